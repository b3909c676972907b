// Shared scene/audio tuning constants. Pure data, usable on host and web.

// Audio analysis
pub const FFT_SIZE: usize = 2048; // analyser transform size
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2; // bins per snapshot

// Animation driver
pub const STEP_MODULUS: u32 = 1000; // frame counter wraps here

// Scene layout
pub const TREE_POINTS: usize = 4000;
pub const TREE_ROWS: usize = 6;
pub const TREE_ROW_SPACING: f32 = 15.0; // distance between rows along -Z
pub const TREE_LATERAL_OFFSET: f32 = 15.0; // trees sit at +/- this X
pub const SNOW_POINTS: usize = 200;
pub const SNOW_VARIANTS: usize = 5; // one snow layer per sprite variant

// Tree shape
pub const TREE_BOTTOM_Y: f32 = -6.0;
pub const TREE_TOP_Y: f32 = 8.0;
pub const TREE_BASE_RADIUS: f32 = 4.0;
pub const TREE_TURNS: f32 = 6.0; // full spiral turns from base to tip
pub const TREE_JITTER: f32 = 0.2; // max jitter at the base, shrinks to 0 at the tip
pub const PHASE_RANGE: f32 = 1000.0;

// Snow box
pub const SNOW_X_RANGE: (f32, f32) = (-25.0, 25.0);
pub const SNOW_Z_RANGE: (f32, f32) = (-150.0, 15.0);
pub const SNOW_SIZE_RANGE: (f32, f32) = (2.0, 4.0);
pub const SNOW_TOP_Y: f32 = 20.0;
pub const SNOW_BOTTOM_Y: f32 = -6.0;
pub const SNOW_PALETTE: [u32; 4] = [0xf1d4d4, 0xf1f6f9, 0xeeeeee, 0xf1f1e8];

// Audio-reactive point size (tree)
pub const AMPLITUDE_FLOOR: f32 = 0.4; // magnitudes below this leave points at min size
pub const AMPLITUDE_SPAN: f32 = 0.6;
pub const TREE_SIZE_MIN: f32 = 1.0;
pub const TREE_SIZE_MAX: f32 = 15.0;

// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;
