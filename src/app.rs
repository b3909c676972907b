use crate::audio::{self, AudioPlayer};
use crate::core::tracks::Track;
use crate::core::{AudioSession, PlaybackError, SceneConfig, SessionError};
use crate::dom;
use crate::events::gesture::{arm_resume_on_gesture, GestureSubscription};
use crate::overlay;
use crate::scene::SceneSession;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Page-wide state behind the track list, the upload input and the scene.
/// Shared as `Rc<RefCell<App>>`; no borrow is held across an await.
pub struct App {
    config: SceneConfig,
    session: AudioSession,
    player: AudioPlayer,
    scene: Option<SceneSession>,
    gesture: Option<GestureSubscription>,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    pub fn new(config: SceneConfig) -> anyhow::Result<SharedApp> {
        let player = AudioPlayer::new()?;
        Ok(Rc::new(RefCell::new(Self {
            config,
            session: AudioSession::new(),
            player,
            scene: None,
            gesture: None,
        })))
    }

    fn report_status(&self) {
        if let Some(doc) = dom::window_document() {
            overlay::show_status(&doc, self.session.status());
        }
    }

    /// Tear down the scene and close the audio context. Loads still in
    /// flight are discarded when they complete.
    pub fn dispose(&mut self) {
        self.session.dispose();
        self.gesture = None;
        if let Some(mut scene) = self.scene.take() {
            scene.dispose();
        }
        self.player.close();
    }
}

enum Payload {
    Remote(&'static Track),
    Upload(web::File),
}

/// Track button tapped.
pub fn select_track(app: &SharedApp, index: usize) {
    let request = {
        let mut a = app.borrow_mut();
        if a.session.is_disposed() {
            return;
        }
        if a.config.preemptive_unlock {
            // must run synchronously inside the tap
            a.player.resume_now();
        }
        a.gesture = None;
        let request = a.session.select_track(index);
        if request.is_ok() {
            a.report_status();
        }
        request
    };
    match request {
        Ok(request) => {
            log::info!("[audio] load #{} {}", request.generation, request.source.name);
            spawn_local(load_and_play(
                app.clone(),
                request.generation,
                Payload::Remote(request.source),
            ));
        }
        Err(e) => {
            log::error!("track selection rejected: {}", e);
            if let Some(doc) = dom::window_document() {
                overlay::show_message(&doc, &e.to_string());
            }
        }
    }
}

/// File input changed. An empty selection changes nothing.
pub fn upload_file(app: &SharedApp, file: Option<web::File>) {
    let request = {
        let mut a = app.borrow_mut();
        let Some(request) = a.session.upload_track(file.as_ref().map(|f| f.name())) else {
            return;
        };
        a.gesture = None;
        a.report_status();
        request
    };
    let Some(file) = file else {
        return;
    };
    log::info!("[audio] load #{} upload {}", request.generation, request.source);
    spawn_local(load_and_play(app.clone(), request.generation, Payload::Upload(file)));
}

async fn load_and_play(app: SharedApp, generation: u64, payload: Payload) {
    let player = app.borrow().player.clone();

    let bytes = match payload {
        Payload::Remote(track) => audio::fetch_track(track.locator).await,
        Payload::Upload(file) => audio::read_upload(&file).await,
    };
    let buffer = match bytes {
        Ok(bytes) => player
            .decode(bytes)
            .await
            .map_err(|e| SessionError::Decode(format!("{:#}", e))),
        Err(e) => Err(SessionError::Load(format!("{:#}", e))),
    };
    let buffer = match buffer {
        Ok(b) => b,
        Err(e) => {
            log::error!("[audio] load #{} failed: {}", generation, e);
            let mut a = app.borrow_mut();
            a.session.load_failed(generation, e);
            a.report_status();
            return;
        }
    };

    if !app.borrow().session.is_current(generation) {
        log::info!("[audio] load #{} superseded", generation);
        return;
    }
    let outcome = player.start(&buffer).await;
    if !app.borrow().session.is_current(generation) {
        return;
    }
    match outcome {
        Ok(()) => on_playing(app).await,
        Err(e) => on_playback_failed(&app, generation, e),
    }
}

fn on_playback_failed(app: &SharedApp, generation: u64, err: PlaybackError) {
    log::warn!("[audio] playback #{} not started: {}", generation, err);
    let armed = {
        let mut a = app.borrow_mut();
        a.session.playback_failed(generation, err);
        a.report_status();
        a.session.gesture_armed()
    };
    if !armed {
        return;
    }
    let Some(doc) = dom::window_document() else {
        return;
    };
    let app_gesture = app.clone();
    let subscription = arm_resume_on_gesture(&doc, move || on_gesture(app_gesture, generation));
    app.borrow_mut().gesture = Some(subscription);
}

fn on_gesture(app: SharedApp, generation: u64) {
    let player = {
        let mut a = app.borrow_mut();
        if !a.session.is_current(generation) || !a.session.gesture() {
            return;
        }
        a.player.resume_now();
        a.player.clone()
    };
    spawn_local(async move {
        let result = player.unlock().await;
        {
            let mut a = app.borrow_mut();
            a.gesture = None;
            if !a.session.is_current(generation) {
                return;
            }
        }
        match result {
            Ok(()) => on_playing(app).await,
            Err(e) => {
                log::error!("[audio] resume after gesture failed: {}", e);
                let mut a = app.borrow_mut();
                a.session.retry_failed(e);
                a.report_status();
            }
        }
    });
}

async fn on_playing(app: SharedApp) {
    let (init, player, config) = {
        let mut a = app.borrow_mut();
        if a.session.is_disposed() {
            return;
        }
        let init = a.session.playback_started();
        a.report_status();
        (init, a.player.clone(), a.config.clone())
    };
    let Some(init) = init else {
        log::info!("[audio] switched track; scene already running");
        return;
    };
    match SceneSession::create(init, &player, &config).await {
        Ok(scene) => {
            let mut a = app.borrow_mut();
            if a.session.is_disposed() {
                drop(scene);
            } else {
                a.scene = Some(scene);
            }
        }
        Err(e) => log::error!("scene init error: {:?}", e),
    }
}
