#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use web_sys as web;

mod app;
mod audio;
mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod scene;
mod starfield;

use crate::core::SceneConfig;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("noel-web starting");
    Ok(())
}

/// Returned by [`mount`]; `dispose()` stops the scene, closes the audio
/// context and detaches every listener `mount` added.
#[wasm_bindgen]
pub struct SceneHandle {
    app: app::SharedApp,
    listeners: Vec<dom::Listener>,
    starfield: Option<starfield::StarfieldHandle>,
}

#[wasm_bindgen]
impl SceneHandle {
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.app.borrow_mut().dispose();
        if let Some(stars) = self.starfield.take() {
            stars.stop();
        }
    }
}

/// Wire the start overlay: track list, upload input and starfield. The
/// particle scene itself starts once audio is confirmed playing.
#[wasm_bindgen]
pub fn mount() -> Result<SceneHandle, JsValue> {
    init().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn init() -> anyhow::Result<SceneHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let search = window.location().search().unwrap_or_default();
    let config = SceneConfig::from_query(&search);
    log::info!(
        "[config] ground={} preemptive_unlock={} greeting_lines={}",
        config.show_ground_plane,
        config.preemptive_unlock,
        config.greeting_lines().len()
    );

    let app = app::App::new(config)?;
    let app_select = app.clone();
    let mut listeners = events::selection::wire_track_list(&document, move |index| {
        app::select_track(&app_select, index)
    })?;
    let app_upload = app.clone();
    listeners.extend(events::selection::wire_upload(&document, move |file| {
        app::upload_file(&app_upload, file)
    })?);

    let starfield = match starfield::mount(&document) {
        Ok(handle) => handle,
        Err(e) => {
            log::warn!("starfield disabled: {:?}", e);
            None
        }
    };

    Ok(SceneHandle {
        app,
        listeners,
        starfield,
    })
}
