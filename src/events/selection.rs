use crate::constants::{TRACK_LIST_ID, UPLOAD_BUTTON_SELECTOR, UPLOAD_INPUT_ID};
use crate::core::tracks::TRACKS;
use crate::dom::{self, Listener};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fill `#base-music-list` with one button per track, replacing whatever it
/// held; a tap calls `on_select` with the track index. The buttons stay live
/// while the returned listeners are kept.
pub fn wire_track_list(
    document: &web::Document,
    on_select: impl Fn(usize) + 'static,
) -> anyhow::Result<Vec<Listener>> {
    let list = document
        .get_element_by_id(TRACK_LIST_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", TRACK_LIST_ID))?;
    list.set_text_content(None);
    let on_select = Rc::new(on_select);
    let mut listeners = Vec::with_capacity(TRACKS.len() * 2);
    for (index, track) in TRACKS.iter().enumerate() {
        let li = document
            .create_element("li")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let button = document
            .create_element("button")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        button.set_class_name("btn");
        _ = button.set_attribute("type", "button");
        button.set_text_content(Some(track.name));
        let select = on_select.clone();
        listeners.extend(dom::add_tap_listener(&button, move || select(index)));
        li.append_child(&button)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        list.append_child(&li)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(listeners)
}

/// `change` on `#upload` hands over the first chosen file (or `None` when the
/// picker was dismissed). The input is cleared afterwards so picking the same
/// file again still fires. The `.upload-btn` proxy opens the picker on touch.
pub fn wire_upload(
    document: &web::Document,
    on_file: impl Fn(Option<web::File>) + 'static,
) -> anyhow::Result<Vec<Listener>> {
    let input: web::HtmlInputElement = document
        .get_element_by_id(UPLOAD_INPUT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", UPLOAD_INPUT_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let input_change = input.clone();
    let mut listeners = vec![dom::add_listener(&input, "change", move |_| {
        let file = input_change.files().and_then(|list| list.get(0));
        input_change.set_value("");
        on_file(file);
    })];

    if let Ok(Some(proxy)) = document.query_selector(UPLOAD_BUTTON_SELECTOR) {
        listeners.push(dom::add_listener(&proxy, "touchstart", move |ev| {
            ev.prevent_default();
            input.click();
        }));
    }
    Ok(listeners)
}
