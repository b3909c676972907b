use crate::constants::RESUME_GRACE_MS;
use crate::core::constants::FFT_SIZE;
use crate::core::{PlaybackError, SpectrumSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// One audio context for the page: buffer source -> analyser -> destination.
/// Selecting a new track swaps the buffer source; the analyser stays.
#[derive(Clone)]
pub struct AudioPlayer {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    current: Rc<RefCell<Option<web::AudioBufferSourceNode>>>,
}

impl AudioPlayer {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(FFT_SIZE as u32);
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("connect analyser: {:?}", e))?;
        Ok(Self {
            ctx,
            analyser,
            current: Rc::new(RefCell::new(None)),
        })
    }

    /// Spectrum source reading from this player's analyser.
    pub fn tap(&self) -> AnalyserTap {
        AnalyserTap {
            analyser: self.analyser.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Running
    }

    /// Ask the context to resume without waiting. Call from inside a user
    /// gesture so the browser counts the activation.
    pub fn resume_now(&self) {
        if self.is_running() {
            return;
        }
        if let Err(e) = self.ctx.resume() {
            log::warn!("[audio] resume rejected: {:?}", e);
        }
    }

    pub async fn decode(&self, data: js_sys::ArrayBuffer) -> anyhow::Result<web::AudioBuffer> {
        let promise = self
            .ctx
            .decode_audio_data(&data)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        value
            .dyn_into::<web::AudioBuffer>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    /// Replace whatever is playing with `buffer`, then make sure the context
    /// is actually running.
    pub async fn start(&self, buffer: &web::AudioBuffer) -> Result<(), PlaybackError> {
        self.stop();
        let source = self
            .ctx
            .create_buffer_source()
            .map_err(|e| PlaybackError::Graph(format!("{:?}", e)))?;
        source.set_buffer(Some(buffer));
        source
            .connect_with_audio_node(&self.analyser)
            .map_err(|e| PlaybackError::Graph(format!("{:?}", e)))?;
        source
            .start()
            .map_err(|e| PlaybackError::Graph(format!("{:?}", e)))?;
        *self.current.borrow_mut() = Some(source);
        log::info!(
            "[audio] source started: {:.1}s, {} ch",
            buffer.duration(),
            buffer.number_of_channels()
        );
        self.unlock().await
    }

    /// Resolve once the context runs. `resume()` can stay pending forever
    /// under an autoplay block, so it races a short timer.
    pub async fn unlock(&self) -> Result<(), PlaybackError> {
        if self.is_running() {
            return Ok(());
        }
        let resume = self
            .ctx
            .resume()
            .map_err(|e| PlaybackError::Graph(format!("{:?}", e)))?;
        let race = js_sys::Promise::race(&js_sys::Array::of2(&resume, &grace_timer()));
        if let Err(e) = JsFuture::from(race).await {
            log::warn!("[audio] resume failed: {:?}", e);
        }
        if self.is_running() {
            Ok(())
        } else {
            Err(PlaybackError::Blocked)
        }
    }

    pub fn stop(&self) {
        if let Some(prev) = self.current.borrow_mut().take() {
            #[allow(deprecated)]
            let _ = prev.stop();
            _ = prev.disconnect();
        }
    }

    /// Stop playback and release the context. The player is unusable after.
    pub fn close(&self) {
        self.stop();
        _ = self.analyser.disconnect();
        match self.ctx.close() {
            Ok(promise) => spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => log::info!("[audio] context closed"),
                    Err(e) => log::warn!("[audio] close rejected: {:?}", e),
                }
            }),
            Err(e) => log::warn!("[audio] close failed: {:?}", e),
        }
    }
}

fn grace_timer() -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, RESUME_GRACE_MS);
        }
    })
}

/// Fetch a remote track into memory.
pub async fn fetch_track(locator: &str) -> anyhow::Result<js_sys::ArrayBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(locator))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp.dyn_into().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    body.dyn_into().map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Read a user-selected file into memory.
pub async fn read_upload(file: &web::File) -> anyhow::Result<js_sys::ArrayBuffer> {
    let body = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    body.dyn_into().map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Byte magnitudes straight from the analyser node.
pub struct AnalyserTap {
    analyser: web::AnalyserNode,
}

impl SpectrumSource for AnalyserTap {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_bins(&self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }
}
