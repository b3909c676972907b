/// Web-side rendering and overlay tuning constants.
///
/// Values that only matter to the browser front-end (DOM ids, overlay copy,
/// post-processing defaults) live here; scene layout lives in `core`.
// DOM ids and selectors
pub const OVERLAY_ID: &str = "overlay";
pub const TRACK_LIST_ID: &str = "base-music-list";
pub const UPLOAD_INPUT_ID: &str = "upload";
pub const UPLOAD_BUTTON_SELECTOR: &str = ".upload-btn";
pub const STARFIELD_CANVAS_ID: &str = "overlay-bg";
pub const GREETING_ID: &str = "sentence-box";
pub const SCENE_CANVAS_ID: &str = "scene-canvas";

// Overlay copy
pub const STATUS_LOADING: &str = "Loading...";
pub const STATUS_TAP_TO_CONTINUE: &str = "Tap anywhere to continue";
pub const STATUS_GPU_UNAVAILABLE: &str = "WebGPU is not available in this browser";

// Playback unlock: how long to wait for `resume()` before treating the
// context as blocked (milliseconds)
pub const RESUME_GRACE_MS: i32 = 300;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.0;
pub const BLOOM_RADIUS: f32 = 0.5;
pub const EXPOSURE: f32 = 1.0;

// Scene clear: transparent so the page background shows through
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

// Starfield palette (r, g, b)
pub const STAR_RGB: (u8, u8, u8) = (255, 209, 143);
pub const FALLING_STAR_RGB: (u8, u8, u8) = (221, 19, 255);
pub const FALLING_TRAIL_RGB: (u8, u8, u8) = (255, 210, 93);
pub const FALLING_STAR_GLOW: f64 = 30.0;
pub const FALLING_TRAIL_GLOW: f64 = 60.0;

// Diagnostics: log frame stats every N frames
pub const FRAME_LOG_INTERVAL: u64 = 600;
