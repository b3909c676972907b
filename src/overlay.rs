use crate::constants::{OVERLAY_ID, STATUS_LOADING, STATUS_TAP_TO_CONTINUE};
use crate::core::Status;
use web_sys as web;

/// Overlay copy for a session status. `None` leaves the overlay untouched.
pub fn status_text(status: &Status) -> Option<String> {
    match status {
        Status::Idle | Status::Playing => None,
        Status::Loading => Some(STATUS_LOADING.to_string()),
        Status::TapToContinue => Some(STATUS_TAP_TO_CONTINUE.to_string()),
        Status::Error(msg) => Some(msg.clone()),
    }
}

/// Replace the overlay contents with a single status line (plain text).
pub fn show_message(document: &web::Document, text: &str) {
    let Some(el) = document.get_element_by_id(OVERLAY_ID) else {
        return;
    };
    el.set_text_content(None);
    match document.create_element("div") {
        Ok(line) => {
            line.set_class_name("text-loading");
            line.set_text_content(Some(text));
            _ = el.append_child(&line);
        }
        Err(_) => el.set_text_content(Some(text)),
    }
}

#[inline]
pub fn show_status(document: &web::Document, status: &Status) {
    if let Some(text) = status_text(status) {
        show_message(document, &text);
    }
}

/// Take the overlay out of the document once the scene is up.
#[inline]
pub fn remove(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        el.remove();
    }
}
