use crate::constants::{
    FALLING_STAR_GLOW, FALLING_STAR_RGB, FALLING_TRAIL_GLOW, FALLING_TRAIL_RGB,
    STARFIELD_CANVAS_ID, STAR_RGB,
};
use crate::core::starfield::{overlay_canvas_size, Starfield, STAR_SIZE};
use crate::dom;
use crate::frame;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct StarfieldView {
    field: Starfield,
    rng: StdRng,
    canvas: web::HtmlCanvasElement,
    cx: web::CanvasRenderingContext2d,
    // backing pixels per CSS pixel
    scale: f32,
}

impl StarfieldView {
    fn resize(&mut self, window: &web::Window) {
        let (w, h) = dom::window_inner_size(window);
        let (bw, bh) = overlay_canvas_size(w as f64, h as f64);
        self.canvas.set_width(bw);
        self.canvas.set_height(bh);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", w));
        _ = style.set_property("height", &format!("{}px", h));
        self.field.resize(bw as f32, bh as f32);
        self.scale = bw as f32 / w.max(1) as f32;
    }

    fn touch(&mut self, client_x: f32, client_y: f32) {
        let (x, y) = (client_x * self.scale, client_y * self.scale);
        if self.field.touch(&mut self.rng, x, y) {
            log::debug!("[starfield] falling star at ({:.0}, {:.0})", x, y);
        }
    }

    fn draw(&mut self) {
        let (w, h) = self.field.size();
        self.cx.clear_rect(0.0, 0.0, w as f64, h as f64);
        self.field.advance(&mut self.rng);

        for star in &self.field.stars {
            trace(&self.cx, star.x, star.y, star.rotation, 1.0, &star.outline());
            let e = star.energy as f64;
            fill(
                &self.cx,
                STAR_RGB,
                e,
                star.curve as f64 * 1.5,
                (star.radius / STAR_SIZE * 0.8) as f64,
            );
        }

        if let Some(f) = &self.field.falling {
            let (x, y) = f.draw_position();
            trace(&self.cx, x, y, f.star.rotation, f.squash(), &f.star.outline());
            let e = f.star.energy as f64;
            if f.falling {
                let alpha = if e > 0.0 { 0.8 / e } else { 1.0 };
                fill(&self.cx, FALLING_TRAIL_RGB, alpha, f.star.curve as f64 * 1.5, FALLING_TRAIL_GLOW);
            } else {
                fill(&self.cx, FALLING_STAR_RGB, e * 1.5, f.star.curve as f64 * 1.5, FALLING_STAR_GLOW);
            }
        }
    }
}

fn trace(
    cx: &web::CanvasRenderingContext2d,
    x: f32,
    y: f32,
    rotation: f32,
    squash: f32,
    outline: &[(f32, f32)],
) {
    cx.save();
    _ = cx.translate(x as f64, y as f64);
    if squash != 1.0 {
        _ = cx.scale(1.0, squash as f64);
    }
    _ = cx.rotate(rotation as f64);
    cx.begin_path();
    for (i, (px, py)) in outline.iter().enumerate() {
        if i == 0 {
            cx.move_to(*px as f64, *py as f64);
        } else {
            cx.line_to(*px as f64, *py as f64);
        }
    }
    cx.close_path();
}

fn fill(
    cx: &web::CanvasRenderingContext2d,
    (r, g, b): (u8, u8, u8),
    alpha: f64,
    line_width: f64,
    glow: f64,
) {
    let style = format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0));
    cx.set_stroke_style_str(&style);
    cx.set_fill_style_str(&style);
    cx.set_shadow_color(&style);
    cx.set_line_width(line_width);
    cx.set_shadow_blur(glow);
    cx.set_shadow_offset_x(0.0);
    cx.set_shadow_offset_y(0.0);
    cx.stroke();
    cx.fill();
    cx.restore();
}

/// Stops the starfield loop; it also stops by itself once its canvas leaves
/// the document. Dropping the handle detaches the pointer and resize
/// listeners.
pub struct StarfieldHandle {
    alive: Rc<Cell<bool>>,
    _listeners: Vec<dom::Listener>,
}

impl StarfieldHandle {
    pub fn stop(self) {
        self.alive.set(false);
    }
}

/// Animate `#overlay-bg` if the page has one.
pub fn mount(document: &web::Document) -> anyhow::Result<Option<StarfieldHandle>> {
    let Some(el) = document.get_element_by_id(STARFIELD_CANVAS_ID) else {
        return Ok(None);
    };
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas: web::HtmlCanvasElement = el.dyn_into().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let cx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut view = StarfieldView {
        field: Starfield::new(1.0, 1.0),
        rng: StdRng::from_entropy(),
        canvas: canvas.clone(),
        cx,
        scale: 1.0,
    };
    view.resize(&window);
    let view = Rc::new(RefCell::new(view));
    let alive = Rc::new(Cell::new(true));

    let mut listeners = Vec::with_capacity(3);
    let v = view.clone();
    listeners.push(dom::add_listener(&window, "resize", move |_| {
        if let Some(w) = web::window() {
            v.borrow_mut().resize(&w);
        }
    }));
    let v = view.clone();
    listeners.push(dom::add_listener(&canvas, "mousemove", move |ev| {
        if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
            v.borrow_mut().touch(m.client_x() as f32, m.client_y() as f32);
        }
    }));
    let v = view.clone();
    listeners.push(dom::add_listener(&canvas, "touchstart", move |ev| {
        let Some(t) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        ev.prevent_default();
        if let Some(touch) = t.touches().get(0) {
            v.borrow_mut().touch(touch.client_x() as f32, touch.client_y() as f32);
        }
    }));

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let alive_tick = alive.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let connected = view.borrow().canvas.is_connected();
        if !alive_tick.get() || !connected {
            tick_clone.borrow_mut().take();
            return;
        }
        view.borrow_mut().draw();
        frame::request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    frame::request_frame(&tick);
    log::info!("[starfield] running");
    Ok(Some(StarfieldHandle {
        alive,
        _listeners: listeners,
    }))
}
