pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod particles;
pub mod session;
pub mod spectrum;
pub mod starfield;
pub mod tracks;
pub mod viewport;

pub use config::SceneConfig;
pub use driver::{AnimationDriver, FrameInputs};
pub use error::{PlaybackError, SessionError};
pub use particles::{ParticlePopulation, PopulationKind, SceneLayout};
pub use session::{AudioSession, LoadRequest, SceneInit, Status};
pub use spectrum::{SpectrumAnalyzer, SpectrumSnapshot, SpectrumSource};
pub use viewport::{Viewport, ViewportChange};

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static GROUND_WGSL: &str = include_str!("../../shaders/ground.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
