// Animation driver state: a frame counter that only ever moves forward.

use super::constants::STEP_MODULUS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Render-time inputs produced by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    /// Frame counter in `0..STEP_MODULUS`; drives snow recycling.
    pub step: u32,
    /// Milliseconds since the scene started.
    pub time_ms: f32,
    /// A fresh spectrum snapshot must be uploaded this frame.
    pub spectrum_updated: bool,
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    step: u32,
    ticks: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            step: 0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total ticks since start (not wrapped).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// `idle -> running`. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == DriverState::Running {
            return false;
        }
        self.state = DriverState::Running;
        true
    }

    /// Advance one frame. `None` while idle.
    pub fn tick(&mut self, time_ms: f64, spectrum_updated: bool) -> Option<FrameInputs> {
        if self.state != DriverState::Running {
            return None;
        }
        self.step = (self.step + 1) % STEP_MODULUS;
        self.ticks += 1;
        Some(FrameInputs {
            step: self.step,
            time_ms: time_ms as f32,
            spectrum_updated,
        })
    }
}
