use thiserror::Error;

/// Failures the audio session reports back to the overlay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("track {index} is out of range (have {count})")]
    TrackOutOfRange { index: usize, count: usize },

    #[error("could not load audio: {0}")]
    Load(String),

    #[error("could not decode audio: {0}")]
    Decode(String),

    #[error("playback could not start: {0}")]
    Playback(String),

    #[error("audio session has been disposed")]
    Disposed,
}

/// Outcome of a failed attempt to start (or resume) playback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The browser refused to run the audio context without a user gesture.
    #[error("playback blocked until a user gesture")]
    Blocked,

    #[error("audio graph error: {0}")]
    Graph(String),
}
