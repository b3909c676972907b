// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core_constants {
    include!("../src/core/constants.rs");
}

use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn spectrum_has_half_the_transform_size() {
    assert_eq!(FFT_SIZE, 2048);
    assert_eq!(SPECTRUM_BINS * 2, FFT_SIZE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_counts_match_the_scene() {
    assert_eq!(TREE_ROWS * 2, 12);
    assert_eq!(TREE_POINTS, 4000);
    assert_eq!(SNOW_VARIANTS, 5);
    assert_eq!(SNOW_POINTS, 200);
    assert_eq!(SNOW_PALETTE.len(), 4);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ranges_are_ordered() {
    assert!(TREE_TOP_Y > TREE_BOTTOM_Y);
    assert!(SNOW_TOP_Y > SNOW_BOTTOM_Y);
    assert!(SNOW_X_RANGE.0 < SNOW_X_RANGE.1);
    assert!(SNOW_Z_RANGE.0 < SNOW_Z_RANGE.1);
    assert!(SNOW_SIZE_RANGE.0 < SNOW_SIZE_RANGE.1);
    assert!(TREE_SIZE_MAX > TREE_SIZE_MIN);
    // snow lands on the same ground the trees stand on
    assert_eq!(SNOW_BOTTOM_Y, TREE_BOTTOM_Y);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn amplitude_window_covers_the_upper_range() {
    assert!(AMPLITUDE_FLOOR > 0.0 && AMPLITUDE_FLOOR < 1.0);
    assert!((AMPLITUDE_FLOOR + AMPLITUDE_SPAN - 1.0).abs() < 1e-6);
    assert_eq!(STEP_MODULUS as f32, PHASE_RANGE);
    assert_eq!(MAX_PIXEL_RATIO, 2.0);
}
