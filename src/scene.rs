use crate::audio::AudioPlayer;
use crate::constants::{GREETING_ID, SCENE_CANVAS_ID, STATUS_GPU_UNAVAILABLE};
use crate::core::constants::FFT_SIZE;
use crate::core::{particles, AnimationDriver, SceneConfig, SceneInit, SpectrumAnalyzer, Viewport};
use crate::dom;
use crate::frame::{self, FrameContext};
use crate::overlay;
use crate::render::GpuState;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the running scene owns. Built once playback is confirmed;
/// `dispose` tears it down.
pub struct SceneSession {
    frame: Rc<RefCell<FrameContext>>,
    alive: Rc<Cell<bool>>,
    canvas: web::HtmlCanvasElement,
    greeting: Option<web::Element>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl SceneSession {
    pub async fn create(
        _init: SceneInit,
        player: &AudioPlayer,
        config: &SceneConfig,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let (width, height) = dom::window_inner_size(&window);
        let viewport = Viewport::new(width, height, window.device_pixel_ratio());
        let canvas = dom::create_scene_canvas(&document, SCENE_CANVAS_ID)?;
        dom::sync_canvas_backing_size(&canvas, &viewport);

        let layout = particles::build_scene(&mut StdRng::from_entropy());
        let gpu = match GpuState::new(&canvas, &layout, config.show_ground_plane).await {
            Ok(g) => g,
            Err(e) => {
                canvas.remove();
                overlay::show_message(&document, STATUS_GPU_UNAVAILABLE);
                return Err(e.context("WebGPU init"));
            }
        };

        overlay::remove(&document);
        let greeting = match dom::show_greeting(&document, GREETING_ID, &config.greeting_lines()) {
            Ok(el) => Some(el),
            Err(e) => {
                log::warn!("greeting not shown: {:?}", e);
                None
            }
        };

        let mut driver = AnimationDriver::new();
        driver.start();
        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            viewport,
            driver,
            analyzer: SpectrumAnalyzer::new(player.tap(), FFT_SIZE),
            gpu: Some(gpu),
            started_at: Instant::now(),
        }));
        let alive = Rc::new(Cell::new(true));

        let resize_ctx = frame_ctx.clone();
        let resize_canvas = canvas.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            let Some(w) = web::window() else {
                return;
            };
            let (width, height) = dom::window_inner_size(&w);
            let mut ctx = resize_ctx.borrow_mut();
            let change = ctx.resize(width, height, w.device_pixel_ratio());
            dom::sync_canvas_backing_size(&resize_canvas, &ctx.viewport);
            log::debug!(
                "[scene] resize {}x{} backing {}x{} aspect {:.3}",
                change.width,
                change.height,
                change.backing_width,
                change.backing_height,
                change.aspect
            );
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

        frame::start_loop(frame_ctx.clone(), alive.clone());
        log::info!(
            "[scene] started: {} trees, {} snow layers, ground={}",
            layout.trees.len(),
            layout.snow.len(),
            config.show_ground_plane
        );

        Ok(Self {
            frame: frame_ctx,
            alive,
            canvas,
            greeting,
            on_resize: Some(on_resize),
        })
    }

    /// Stop the frame loop, release GPU resources and take the scene's
    /// elements out of the page. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(cb) = self.on_resize.take() {
            if let Some(w) = web::window() {
                _ = w.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
            }
        }
        self.frame.borrow_mut().gpu = None;
        self.canvas.remove();
        if let Some(el) = self.greeting.take() {
            el.remove();
        }
        log::info!("[scene] disposed");
    }
}

impl Drop for SceneSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
