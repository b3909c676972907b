// Host-side tests for the particle field generator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod noel {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
}

use glam::Vec3;
use noel::constants::*;
use noel::particles::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn tree_vectors_are_length_aligned() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [0usize, 1, 2, 17, 4000] {
        let pop = build_tree(&mut rng, n, Vec3::ZERO);
        assert_eq!(pop.len(), n);
        assert!(pop.is_aligned());
        assert_eq!(pop.colors.len(), n);
        assert_eq!(pop.spectrum_coords.len(), n);
    }
}

#[test]
fn empty_tree_is_valid() {
    let mut rng = StdRng::seed_from_u64(1);
    let pop = build_tree(&mut rng, 0, Vec3::new(15.0, 0.0, 0.0));
    assert!(pop.is_empty());
    assert!(pop.is_aligned());
    assert_eq!(pop.kind, PopulationKind::Tree);
}

#[test]
fn tree_radius_shrinks_towards_the_tip() {
    let mut rng = StdRng::seed_from_u64(42);
    let pop = build_tree(&mut rng, 4000, Vec3::ZERO);
    let third = (TREE_TOP_Y - TREE_BOTTOM_Y) / 3.0;
    let (mut low_sum, mut low_n, mut high_sum, mut high_n) = (0.0f32, 0u32, 0.0f32, 0u32);
    for p in &pop.positions {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        if p.y < TREE_BOTTOM_Y + third {
            low_sum += r;
            low_n += 1;
        } else if p.y > TREE_TOP_Y - third {
            high_sum += r;
            high_n += 1;
        }
    }
    assert!(low_n > 100 && high_n > 100);
    let low = low_sum / low_n as f32;
    let high = high_sum / high_n as f32;
    assert!(low > high * 2.0, "base {low} vs tip {high}");
}

#[test]
fn tree_points_stay_inside_the_cone_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let pop = build_tree(&mut rng, 2000, Vec3::ZERO);
    for p in &pop.positions {
        assert!(p.y >= TREE_BOTTOM_Y - TREE_JITTER && p.y <= TREE_TOP_Y + TREE_JITTER);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r <= TREE_BASE_RADIUS + TREE_JITTER * 1.5);
    }
}

#[test]
fn tree_attributes_follow_the_index_sweep() {
    let mut rng = StdRng::seed_from_u64(9);
    let n = 100;
    let pop = build_tree(&mut rng, n, Vec3::ZERO);
    assert!(approx(pop.spectrum_coords[0], 1.0));
    for w in pop.spectrum_coords.windows(2) {
        assert!(w[1] < w[0]);
    }
    assert!(pop.spectrum_coords.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(pop.sizes.iter().all(|s| *s == 1.0));
    assert!(pop.phases.iter().all(|p| (0.0..PHASE_RANGE).contains(p)));
    assert_eq!(pop.colors[0], hsl_to_rgb(1.0, 1.0, 0.5));
}

#[test]
fn snow_layer_fills_the_snow_box() {
    let mut rng = StdRng::seed_from_u64(11);
    let pop = build_snow_layer(&mut rng, 500, 3);
    assert_eq!(pop.kind, PopulationKind::Snow { variant: 3 });
    assert!(pop.is_aligned());
    assert_eq!(pop.len(), 500);
    let palette: Vec<[f32; 3]> = SNOW_PALETTE.iter().map(|h| rgb_from_hex(*h)).collect();
    for i in 0..pop.len() {
        let p = pop.positions[i];
        assert!(p.x >= SNOW_X_RANGE.0 && p.x < SNOW_X_RANGE.1);
        assert!(p.z >= SNOW_Z_RANGE.0 && p.z < SNOW_Z_RANGE.1);
        assert_eq!(p.y, 0.0);
        assert!(pop.sizes[i] >= SNOW_SIZE_RANGE.0 && pop.sizes[i] < SNOW_SIZE_RANGE.1);
        assert!(palette.contains(&pop.colors[i]));
        assert!((0.0..PHASE_RANGE).contains(&pop.phases[i]));
        assert!((0.0..PHASE_RANGE).contains(&pop.phases_secondary[i]));
    }
}

#[test]
fn empty_snow_layer_is_valid() {
    let mut rng = StdRng::seed_from_u64(2);
    let pop = build_snow_layer(&mut rng, 0, 0);
    assert!(pop.is_empty());
    assert!(pop.is_aligned());
}

#[test]
fn scene_has_twelve_trees_and_five_snow_layers() {
    let mut rng = StdRng::seed_from_u64(2024);
    let layout = build_scene(&mut rng);
    assert_eq!(layout.trees.len(), 12);
    assert_eq!(layout.snow.len(), 5);
    assert!(layout.trees.iter().all(|t| t.len() == TREE_POINTS && t.is_aligned()));
    assert!(layout.snow.iter().all(|s| s.len() == SNOW_POINTS && s.is_aligned()));
    let variants: Vec<_> = layout.snow.iter().map(|s| s.kind).collect();
    for v in 0..5u8 {
        assert!(variants.contains(&PopulationKind::Snow { variant: v }));
    }
    assert_eq!(layout.populations().count(), 17);
    // snow is submitted before the trees
    assert!(matches!(
        layout.populations().next().map(|p| p.kind),
        Some(PopulationKind::Snow { .. })
    ));
}

#[test]
fn tree_origins_mirror_across_x_and_recede() {
    let origins = tree_origins();
    assert_eq!(origins.len(), 12);
    assert!(origins.contains(&Vec3::new(15.0, 0.0, 0.0)));
    assert!(origins.contains(&Vec3::new(-15.0, 0.0, 0.0)));
    assert!(origins.contains(&Vec3::new(15.0, 0.0, -75.0)));
    assert!(origins.contains(&Vec3::new(-15.0, 0.0, -75.0)));
    assert!(origins.iter().all(|o| o.z <= 0.0 && o.x.abs() == 15.0));
}

#[test]
fn hsl_primaries_and_grey() {
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!(approx(red[0], 1.0) && approx(red[1], 0.0) && approx(red[2], 0.0));
    let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
    assert!(approx(green[0], 0.0) && approx(green[1], 1.0) && approx(green[2], 0.0));
    let blue = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
    assert!(approx(blue[0], 0.0) && approx(blue[1], 0.0) && approx(blue[2], 1.0));
    assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), [0.25, 0.25, 0.25]);
    // hue wraps
    let wrapped = hsl_to_rgb(1.0, 1.0, 0.5);
    assert!((0..3).all(|i| approx(wrapped[i], red[i])));
}

#[test]
fn hex_colors_unpack_per_channel() {
    assert_eq!(rgb_from_hex(0xff0000), [1.0, 0.0, 0.0]);
    let c = rgb_from_hex(0xeeeeee);
    assert!(approx(c[0], 238.0 / 255.0) && c[0] == c[1] && c[1] == c[2]);
}

#[test]
fn tree_point_size_follows_the_amplitude_window() {
    assert!(approx(tree_point_size(0.0), 1.0));
    assert!(approx(tree_point_size(0.4), 1.0));
    assert!(approx(tree_point_size(0.7), 8.0));
    assert!(approx(tree_point_size(1.0), 15.0));
    assert!(approx(tree_point_size(2.0), 15.0));
}

#[test]
fn snow_falls_from_top_to_bottom_each_cycle() {
    assert!(approx(snow_height(0.0, 0), SNOW_TOP_Y));
    assert!(approx(snow_height(500.0, 0), 7.0));
    assert!(approx(snow_height(999.0, 1), SNOW_TOP_Y));
    let mut prev = snow_height(100.0, 0);
    for step in 1..800u32 {
        let h = snow_height(100.0, step);
        assert!(h < prev);
        assert!(h >= SNOW_BOTTOM_Y && h <= SNOW_TOP_Y);
        prev = h;
    }
}

#[test]
fn spectrum_bin_is_clamped() {
    assert_eq!(spectrum_bin(0.0, 1024), 0);
    assert_eq!(spectrum_bin(0.5, 1024), 512);
    assert_eq!(spectrum_bin(1.0, 1024), 1023);
    assert_eq!(spectrum_bin(-0.5, 1024), 0);
    assert_eq!(spectrum_bin(0.5, 0), 0);
}
