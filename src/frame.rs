use crate::audio::AnalyserTap;
use crate::constants::FRAME_LOG_INTERVAL;
use crate::core::{AnimationDriver, SpectrumAnalyzer, Viewport, ViewportChange};
use crate::render::GpuState;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewport: Viewport,
    pub driver: AnimationDriver,
    pub analyzer: SpectrumAnalyzer<AnalyserTap>,
    pub gpu: Option<GpuState>,
    pub started_at: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        self.analyzer.sample();
        let elapsed_ms = self.started_at.elapsed().as_secs_f64() * 1000.0;
        let Some(inputs) = self.driver.tick(elapsed_ms, true) else {
            return;
        };

        if let Some(gpu) = &mut self.gpu {
            if inputs.spectrum_updated {
                gpu.write_spectrum(self.analyzer.snapshot().as_slice());
            }
            let camera = self.viewport.camera();
            gpu.set_frame(
                camera.view_matrix(),
                camera.projection_matrix(),
                inputs.time_ms,
                inputs.step,
            );
            match gpu.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        if self.driver.ticks() % FRAME_LOG_INTERVAL == 0 {
            let bins = self.analyzer.snapshot().as_slice();
            let peak = bins.iter().copied().max().unwrap_or(0);
            log::debug!(
                "[frame] tick={} step={} t={:.0}ms peak={}",
                self.driver.ticks(),
                inputs.step,
                inputs.time_ms,
                peak
            );
        }
    }

    /// Apply a window resize right away: camera, logical size, backing size
    /// and every size-dependent GPU target.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> ViewportChange {
        self.viewport.set_device_pixel_ratio(device_pixel_ratio);
        let change = self.viewport.on_resize(width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(change.backing_width, change.backing_height);
        }
        change
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `alive` is cleared.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, alive: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            // Break the self-reference so the closure and its context drop.
            tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

pub(crate) fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
