use crate::core::viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An attached event listener. Dropping it removes the listener and frees
/// the closure.
#[must_use = "dropping a Listener detaches it"]
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn add_listener(
    target: &web::EventTarget,
    event: &'static str,
    mut handler: impl FnMut(web::Event) + 'static,
) -> Listener {
    let closure =
        Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("add {} listener failed: {:?}", event, e);
    }
    Listener {
        target: target.clone(),
        event,
        closure,
    }
}

/// Click and touchstart both trigger `handler`; touchstart suppresses the
/// synthetic click that would otherwise follow it.
pub fn add_tap_listener(target: &web::EventTarget, handler: impl Fn() + 'static) -> [Listener; 2] {
    let handler = std::rc::Rc::new(handler);
    let on_click = handler.clone();
    [
        add_listener(target, "click", move |_| on_click()),
        add_listener(target, "touchstart", move |ev| {
            ev.prevent_default();
            handler();
        }),
    ]
}

/// Window size in CSS pixels.
pub fn window_inner_size(window: &web::Window) -> (u32, u32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w.max(1.0) as u32, h.max(1.0) as u32)
}

/// Create the full-viewport scene canvas and attach it to `<body>`.
pub fn create_scene_canvas(
    document: &web::Document,
    id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(id);
    _ = canvas.set_attribute(
        "style",
        "position:fixed;left:0;top:0;width:100%;height:100%;display:block",
    );
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

/// Match the canvas backing store to the viewport's capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, vp: &viewport::Viewport) {
    let (w_px, h_px) = vp.backing_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}

/// Show the greeting as plain text; `\n` becomes a line break element.
pub fn show_greeting(
    document: &web::Document,
    id: &str,
    lines: &[&str],
) -> anyhow::Result<web::Element> {
    let h1 = document
        .create_element("h1")
        .map_err(|e| anyhow::anyhow!("create h1: {:?}", e))?;
    h1.set_id(id);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            let br = document
                .create_element("br")
                .map_err(|e| anyhow::anyhow!("create br: {:?}", e))?;
            _ = h1.append_child(&br);
        }
        _ = h1.append_child(&document.create_text_node(line));
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    body.append_child(&h1)
        .map_err(|e| anyhow::anyhow!("append greeting: {:?}", e))?;
    Ok(h1)
}
