// Procedural particle populations: conic spiral trees and drifting snow.
// Everything here is built once at scene setup; render-time motion lives in
// the shader, with host mirrors of its mappings at the bottom of this file.

use super::constants::*;
use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationKind {
    /// Audio-reactive spiral cone.
    Tree,
    /// Time-driven falling layer; `variant` selects the flake sprite.
    Snow { variant: u8 },
}

/// Fixed-size point set with length-aligned per-point attributes.
#[derive(Clone, Debug)]
pub struct ParticlePopulation {
    pub kind: PopulationKind,
    /// World-space offset applied to every point.
    pub origin: Vec3,
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
    pub sizes: Vec<f32>,
    pub phases: Vec<f32>,
    pub phases_secondary: Vec<f32>,
    /// Normalised [0, 1] coordinate into the spectrum snapshot.
    pub spectrum_coords: Vec<f32>,
}

impl ParticlePopulation {
    fn with_capacity(kind: PopulationKind, origin: Vec3, count: usize) -> Self {
        Self {
            kind,
            origin,
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            sizes: Vec::with_capacity(count),
            phases: Vec::with_capacity(count),
            phases_secondary: Vec::with_capacity(count),
            spectrum_coords: Vec::with_capacity(count),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All attribute vectors hold exactly one entry per point.
    pub fn is_aligned(&self) -> bool {
        let n = self.positions.len();
        self.colors.len() == n
            && self.sizes.len() == n
            && self.phases.len() == n
            && self.phases_secondary.len() == n
            && self.spectrum_coords.len() == n
    }
}

/// All populations of one scene.
#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub trees: Vec<ParticlePopulation>,
    pub snow: Vec<ParticlePopulation>,
}

impl SceneLayout {
    /// Snow first so it sits behind the trees in submission order.
    pub fn populations(&self) -> impl Iterator<Item = &ParticlePopulation> {
        self.snow.iter().chain(self.trees.iter())
    }
}

#[inline]
pub fn remap(value: f32, src_min: f32, src_max: f32, dst_min: f32, dst_max: f32) -> f32 {
    dst_min + ((value - src_min) / (src_max - src_min)) * (dst_max - dst_min)
}

#[inline]
fn jitter<R: Rng>(rng: &mut R, amount: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * amount
}

/// Build one spiral-cone tree of `count` points around `origin`.
pub fn build_tree<R: Rng>(rng: &mut R, count: usize, origin: Vec3) -> ParticlePopulation {
    let mut pop = ParticlePopulation::with_capacity(PopulationKind::Tree, origin, count);
    for i in 0..count {
        let t: f32 = rng.gen();
        let y = remap(t, 0.0, 1.0, TREE_BOTTOM_Y, TREE_TOP_Y);
        // Odd points run half a turn behind: two interleaved helices.
        let angle = remap(t, 0.0, 1.0, 0.0, TREE_TURNS * TAU) + (TAU / 2.0) * (i % 2) as f32;
        let radius = remap(t, 0.0, 1.0, TREE_BASE_RADIUS, 0.0);
        let z = radius * angle.cos();
        let x = radius * angle.sin();

        let spread = TREE_JITTER * (1.0 - t);
        pop.positions.push(Vec3::new(
            x + jitter(rng, spread),
            y + jitter(rng, spread),
            z + jitter(rng, spread),
        ));

        let sweep = remap(i as f32, 0.0, count as f32, 1.0, 0.0);
        pop.colors.push(hsl_to_rgb(sweep, 1.0, 0.5));
        pop.sizes.push(1.0);
        pop.phases.push(rng.gen_range(0.0..PHASE_RANGE));
        pop.phases_secondary.push(0.0);
        pop.spectrum_coords.push(sweep);
    }
    pop
}

/// Build one layer of `count` snowflakes scattered through the snow box.
pub fn build_snow_layer<R: Rng>(rng: &mut R, count: usize, variant: u8) -> ParticlePopulation {
    let mut pop =
        ParticlePopulation::with_capacity(PopulationKind::Snow { variant }, Vec3::ZERO, count);
    for _ in 0..count {
        let x = rng.gen_range(SNOW_X_RANGE.0..SNOW_X_RANGE.1);
        let z = rng.gen_range(SNOW_Z_RANGE.0..SNOW_Z_RANGE.1);
        // y is recomputed every frame from phase + step
        pop.positions.push(Vec3::new(x, 0.0, z));

        let hex = *SNOW_PALETTE.choose(rng).unwrap_or(&SNOW_PALETTE[0]);
        pop.colors.push(rgb_from_hex(hex));
        pop.sizes.push(rng.gen_range(SNOW_SIZE_RANGE.0..SNOW_SIZE_RANGE.1));
        pop.phases.push(rng.gen_range(0.0..PHASE_RANGE));
        pop.phases_secondary.push(rng.gen_range(0.0..PHASE_RANGE));
        pop.spectrum_coords.push(0.0);
    }
    pop
}

/// Tree origins: two per row (left and right), rows receding along -Z.
pub fn tree_origins() -> Vec<Vec3> {
    (0..TREE_ROWS)
        .flat_map(|row| {
            let z = -TREE_ROW_SPACING * row as f32;
            [
                Vec3::new(TREE_LATERAL_OFFSET, 0.0, z),
                Vec3::new(-TREE_LATERAL_OFFSET, 0.0, z),
            ]
        })
        .collect()
}

/// The full scene: one snow layer per sprite variant and two trees per row.
pub fn build_scene<R: Rng>(rng: &mut R) -> SceneLayout {
    let snow = (0..SNOW_VARIANTS)
        .map(|v| build_snow_layer(rng, SNOW_POINTS, v as u8))
        .collect();
    let trees = tree_origins()
        .into_iter()
        .map(|origin| build_tree(rng, TREE_POINTS, origin))
        .collect();
    SceneLayout { trees, snow }
}

/// HSL (all components in [0, 1]) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}

#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// ---------------- Render-time mappings (mirrored in particles.wgsl) ----------------

/// Point size for a tree point given its bin magnitude in [0, 1].
#[inline]
pub fn tree_point_size(amplitude: f32) -> f32 {
    let clamped = (amplitude - AMPLITUDE_FLOOR).clamp(0.0, AMPLITUDE_SPAN);
    remap(clamped, 0.0, AMPLITUDE_SPAN, TREE_SIZE_MIN, TREE_SIZE_MAX)
}

/// Vertical position of a snowflake: falls from the top to the bottom of the
/// box once every `STEP_MODULUS` frames, offset by its phase.
#[inline]
pub fn snow_height(phase: f32, step: u32) -> f32 {
    let m = STEP_MODULUS as f32;
    remap((phase + step as f32).rem_euclid(m), 0.0, m, SNOW_TOP_Y, SNOW_BOTTOM_Y)
}

/// Snapshot bin sampled for a spectrum coordinate (nearest, clamped).
#[inline]
pub fn spectrum_bin(coord: f32, bins: usize) -> usize {
    if bins == 0 {
        return 0;
    }
    ((coord.max(0.0) * bins as f32) as usize).min(bins - 1)
}
