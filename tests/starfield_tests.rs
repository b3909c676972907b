// Host-side tests for the overlay starfield simulation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod noel {
    pub mod starfield {
        include!("../src/core/starfield.rs");
    }
}

use noel::starfield::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_star(x: f32, y: f32, radius: f32) -> Star {
    Star {
        x,
        y,
        radius,
        rotation: 0.0,
        spin: 0.0,
        curve: 0.3,
        energy: 0.5,
        dimming: false,
    }
}

fn field_with_falling(x: f32, y: f32) -> Starfield {
    let mut field = Starfield::new(1000.0, 800.0);
    field.falling = Some(FallingStar {
        star: quiet_star(x, y, 5.0),
        falling: false,
        vx: 0.0,
        vy: 0.0,
    });
    field
}

#[test]
fn spawns_one_star_per_frame_up_to_cap() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = Starfield::new(540.0, 960.0);
    field.advance(&mut rng);
    assert_eq!(field.stars.len(), 1);
    assert!((field.stars[0].energy - ENERGY_STEP).abs() < 1e-6);

    for n in 2..=20 {
        field.advance(&mut rng);
        assert_eq!(field.stars.len(), n.min(STAR_CAP));
    }
}

#[test]
fn spawned_stars_stay_on_canvas() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let s = Star::spawn(&mut rng, 300.0, 200.0);
        assert!((0.0..300.0).contains(&s.x));
        assert!((0.0..200.0).contains(&s.y));
        assert!(s.radius >= STAR_SIZE && s.radius <= STAR_SIZE * STAR_SIZE + STAR_SIZE);
        assert!(s.curve >= STAR_CURVE && s.curve <= STAR_CURVE * 2.0);
    }
}

#[test]
fn faded_stars_are_removed() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = Starfield::new(100.0, 100.0);
    for _ in 0..STAR_CAP {
        let mut s = quiet_star(10.0, 10.0, 5.0);
        s.dimming = true;
        s.energy = 0.0005;
        field.stars.push(s);
    }
    field.advance(&mut rng);
    assert!(field.stars.is_empty());
}

#[test]
fn star_dims_after_peaking() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut field = Starfield::new(100.0, 100.0);
    let mut s = quiet_star(10.0, 10.0, 5.0);
    s.energy = 0.995;
    field.stars.push(s);
    field.advance(&mut rng);
    assert!(field.stars[0].dimming);
}

#[test]
fn touching_the_falling_star_drops_it() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = field_with_falling(100.0, 100.0);
    assert!(field.touch(&mut rng, 105.0, 105.0));
    let f = field.falling.as_ref().unwrap();
    assert!(f.falling);
    assert_eq!(f.star.energy, 1.0);
    assert!((f.star.radius - 9.0).abs() < 1e-5);
    // left half of the screen: drifts right
    assert!(f.vx > 0.0);
    assert!(f.vy > 0.0);

    // already falling
    assert!(!field.touch(&mut rng, 105.0, 105.0));
}

#[test]
fn touch_on_right_half_drifts_left() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut field = field_with_falling(800.0, 100.0);
    assert!(field.touch(&mut rng, 800.0, 100.0));
    assert!(field.falling.as_ref().unwrap().vx < 0.0);
}

#[test]
fn touch_misses() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut field = field_with_falling(100.0, 100.0);
    // reach is twice the radius
    assert!(!field.touch(&mut rng, 111.0, 100.0));
    assert!(!field.falling.as_ref().unwrap().falling);

    let mut empty = Starfield::new(100.0, 100.0);
    assert!(!empty.touch(&mut rng, 50.0, 50.0));
}

#[test]
fn falling_star_fades_and_accelerates() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut field = field_with_falling(100.0, 100.0);
    field.touch(&mut rng, 100.0, 100.0);
    let vx0 = field.falling.as_ref().unwrap().vx;
    field.advance(&mut rng);
    let f = field.falling.as_ref().unwrap();
    assert!(f.star.energy < 1.0);
    assert!((f.vx - vx0 * 1.8).abs() < 1e-6);
    assert!(f.squash() < 1.0);
}

#[test]
fn falling_star_eventually_disappears() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut field = field_with_falling(100.0, 100.0);
    field.touch(&mut rng, 100.0, 100.0);
    let mut gone = false;
    for _ in 0..400 {
        field.advance(&mut rng);
        if field.falling.as_ref().map_or(true, |f| !f.falling) {
            gone = true;
            break;
        }
    }
    assert!(gone);
}

#[test]
fn outline_alternates_outer_and_inner() {
    let pts = star_outline(10.0, 0.5);
    assert_eq!(pts.len(), 11);
    assert_eq!(pts[0], (0.0, -10.0));
    for (i, (x, y)) in pts.iter().enumerate() {
        let r = (x * x + y * y).sqrt();
        let expected = if i % 2 == 0 { 10.0 } else { 5.0 };
        assert!((r - expected).abs() < 1e-4, "point {} radius {}", i, r);
    }
    let last = pts[10];
    assert!(last.0.abs() < 1e-4 && (last.1 + 10.0).abs() < 1e-4);
}

#[test]
fn overlay_canvas_scaling() {
    assert_eq!(overlay_canvas_size(540.0, 960.0), (270, 480));
    assert_eq!(overlay_canvas_size(1080.0, 1920.0), (1080, 1920));
    assert_eq!(overlay_canvas_size(3000.0, 4000.0), (3000, 4000));
}
