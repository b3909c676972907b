// Audio session state machine. Pure logic: the web layer executes the load
// requests it hands out and reports outcomes back, the same way the frame
// loop executes scheduled events.

use super::error::{PlaybackError, SessionError};
use super::tracks::{self, Track};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Unstarted,
    Loading,
    Playing,
    Blocked,
    Failed,
}

/// What the overlay should currently tell the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Idle,
    Loading,
    TapToContinue,
    Playing,
    Error(String),
}

/// One fetch/decode to perform. `generation` ties the completion back to the
/// selection that asked for it; `source` is the track, or the uploaded file's
/// name.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest<S> {
    pub generation: u64,
    pub source: S,
}

/// Proof that confirmed playback may build the scene. Handed out once.
#[derive(Debug, PartialEq, Eq)]
pub struct SceneInit {
    _private: (),
}

/// Single-use latch for the resume-on-gesture subscription.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureLatch {
    armed: bool,
}

impl GestureLatch {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns true for the first gesture after arming, false afterwards.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }
}

#[derive(Debug)]
pub struct AudioSession {
    state: PlaybackState,
    status: Status,
    generation: u64,
    scene_started: bool,
    gesture: GestureLatch,
    disposed: bool,
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSession {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Unstarted,
            status: Status::Idle,
            generation: 0,
            scene_started: false,
            gesture: GestureLatch::default(),
            disposed: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn scene_started(&self) -> bool {
        self.scene_started
    }

    pub fn gesture_armed(&self) -> bool {
        self.gesture.is_armed()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Shut the session down. Loads still in flight become stale and no
    /// further selection, upload or scene init is accepted.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.generation += 1;
        self.state = PlaybackState::Unstarted;
        self.status = Status::Idle;
        self.gesture = GestureLatch::default();
    }

    /// Start loading the track at `index` from the fixed list.
    pub fn select_track(
        &mut self,
        index: usize,
    ) -> Result<LoadRequest<&'static Track>, SessionError> {
        if self.disposed {
            return Err(SessionError::Disposed);
        }
        let track = tracks::track(index).ok_or(SessionError::TrackOutOfRange {
            index,
            count: tracks::track_count(),
        })?;
        Ok(self.begin_load(track))
    }

    /// Start loading a user-supplied file. `None` (empty file list) is a no-op.
    pub fn upload_track(&mut self, file_name: Option<String>) -> Option<LoadRequest<String>> {
        if self.disposed {
            return None;
        }
        let name = file_name?;
        Some(self.begin_load(name))
    }

    fn begin_load<S>(&mut self, source: S) -> LoadRequest<S> {
        self.generation += 1;
        self.state = PlaybackState::Loading;
        self.status = Status::Loading;
        // A pending tap-to-continue belongs to the previous selection.
        self.gesture = GestureLatch::default();
        LoadRequest {
            generation: self.generation,
            source,
        }
    }

    /// Whether a completion for `generation` still belongs to the latest selection.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Fetch or decode failed for `generation`. Stale failures are ignored.
    pub fn load_failed(&mut self, generation: u64, err: SessionError) {
        if !self.is_current(generation) {
            return;
        }
        self.state = PlaybackState::Failed;
        self.status = Status::Error(err.to_string());
    }

    /// Playback confirmed running. Yields the scene-init token the first time
    /// only; later confirmations (re-selection, duplicate gestures) get `None`.
    pub fn playback_started(&mut self) -> Option<SceneInit> {
        if self.disposed {
            return None;
        }
        self.state = PlaybackState::Playing;
        self.status = Status::Playing;
        self.gesture = GestureLatch::default();
        if self.scene_started {
            return None;
        }
        self.scene_started = true;
        Some(SceneInit { _private: () })
    }

    /// Playback start attempt for `generation` failed. A policy block arms the
    /// gesture latch; any other failure is terminal for this selection.
    pub fn playback_failed(&mut self, generation: u64, err: PlaybackError) {
        if !self.is_current(generation) {
            return;
        }
        match err {
            PlaybackError::Blocked => {
                self.state = PlaybackState::Blocked;
                self.status = Status::TapToContinue;
                self.gesture.arm();
            }
            other => {
                self.state = PlaybackState::Failed;
                self.status = Status::Error(SessionError::Playback(other.to_string()).to_string());
            }
        }
    }

    /// A click or touch arrived while blocked. True means "retry playback now";
    /// it is true at most once per block.
    pub fn gesture(&mut self) -> bool {
        self.state == PlaybackState::Blocked && self.gesture.fire()
    }

    /// The single gesture retry failed. Not re-armed: the user must pick again.
    pub fn retry_failed(&mut self, err: PlaybackError) {
        self.state = PlaybackState::Failed;
        self.status = Status::Error(SessionError::Playback(err.to_string()).to_string());
    }
}
