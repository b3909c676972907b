// End-to-end flow over the pure modules: pick a track, get blocked, tap,
// and build the scene exactly once.

#![allow(dead_code)]
mod noel {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod tracks {
        include!("../src/core/tracks.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod driver {
        include!("../src/core/driver.rs");
    }
}

use noel::constants::*;
use noel::driver::AnimationDriver;
use noel::error::PlaybackError;
use noel::particles::build_scene;
use noel::session::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn autoplay_allowed_builds_scene() {
    let mut session = AudioSession::new();
    let req = session.select_track(2).unwrap();
    assert_eq!(req.source.name, "This Christmas");
    assert!(req.source.locator.contains("This_Christmas"));

    let init = session.playback_started();
    assert!(init.is_some());

    let layout = build_scene(&mut StdRng::seed_from_u64(1));
    assert_eq!(layout.trees.len(), TREE_ROWS * 2);
    assert_eq!(layout.snow.len(), SNOW_VARIANTS);
    assert!(layout.populations().all(|p| p.is_aligned()));

    let mut driver = AnimationDriver::new();
    assert!(driver.start());
    assert_eq!(driver.tick(16.0, true).map(|f| f.step), Some(1));
}

#[test]
fn blocked_then_single_tap_builds_scene_once() {
    let mut session = AudioSession::new();
    let req = session.select_track(0).unwrap();
    session.playback_failed(req.generation, PlaybackError::Blocked);
    assert_eq!(session.status(), &Status::TapToContinue);

    // click and touchstart from the same tap
    let mut inits = 0;
    for _ in 0..2 {
        if session.gesture() && session.playback_started().is_some() {
            inits += 1;
        }
    }
    assert_eq!(inits, 1);
    assert!(session.scene_started());

    // later selections reuse the running scene
    let next = session.select_track(1).unwrap();
    assert!(session.is_current(next.generation));
    assert!(session.playback_started().is_none());
}

#[test]
fn late_completion_of_superseded_load_is_dropped() {
    let mut session = AudioSession::new();
    let first = session.select_track(0).unwrap();
    let second = session.select_track(3).unwrap();

    // the first load finishes after the second was requested
    assert!(!session.is_current(first.generation));
    session.playback_failed(first.generation, PlaybackError::Blocked);
    assert!(!session.gesture_armed());

    assert!(session.is_current(second.generation));
    assert!(session.playback_started().is_some());
}

#[test]
fn disposed_scene_never_initializes() {
    let mut session = AudioSession::new();
    let req = session.select_track(0).unwrap();
    session.playback_failed(req.generation, PlaybackError::Blocked);
    session.dispose();

    // the tap that would have resumed playback arrives after teardown
    assert!(!session.gesture());
    assert!(session.playback_started().is_none());
    assert!(!session.scene_started());
}
