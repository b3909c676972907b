// Decorative starfield behind the start overlay: a handful of twinkling
// five-point stars and at most one "falling star" that drops when touched.
// Simulation only; drawing happens on a 2D canvas in the web layer.

use rand::Rng;
use std::f32::consts::PI;

pub const STAR_CAP: usize = 15;
pub const STAR_SIZE: f32 = 2.5;
pub const STAR_CURVE: f32 = 0.2; // inner/outer radius ratio base
pub const ENERGY_STEP: f32 = 0.008;
pub const FALLING_CHANCE: f32 = 0.15;
pub const GRAVITY: f32 = 1.2;
pub const SPIN_RATE: f32 = 0.008; // radians per frame at full spin
pub const STAR_POINTS: usize = 5;
pub const STAR_HALF_ANGLE: f32 = PI / 5.0; // rotation between outer and inner vertex

// Overlay canvas never exceeds this resolution; CSS stretches it.
pub const OVERLAY_MAX_WIDTH: f64 = 1080.0;
pub const OVERLAY_MAX_HEIGHT: f64 = 1920.0;

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Outer radius.
    pub radius: f32,
    /// Current rotation and its per-frame drift direction.
    pub rotation: f32,
    pub spin: f32,
    /// Inner vertex radius as a fraction of `radius`.
    pub curve: f32,
    /// Brightness; doubles as alpha.
    pub energy: f32,
    pub dimming: bool,
}

impl Star {
    pub fn spawn<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            radius: rng.gen::<f32>() * STAR_SIZE * STAR_SIZE + STAR_SIZE,
            rotation: PI / rng.gen::<f32>().max(1e-3),
            spin: rng.gen::<f32>() * 2.0 - 1.0,
            curve: rng.gen::<f32>() * (STAR_CURVE * 2.0 - STAR_CURVE) + STAR_CURVE,
            energy: 0.0,
            dimming: false,
        }
    }

    /// Twinkle: brighten until nearly full, then fade at a size-dependent rate.
    /// `rise` and `fall_div` let the falling star twinkle faster.
    fn twinkle(&mut self, rise: f32, fall_div: f32) {
        if self.dimming {
            self.energy -= ENERGY_STEP * self.radius / fall_div;
        } else {
            self.energy += rise;
        }
        if self.energy > 1.0 - ENERGY_STEP && !self.dimming {
            self.dimming = true;
        }
        self.rotation += self.spin * SPIN_RATE;
    }

    pub fn faded(&self) -> bool {
        self.dimming && self.energy < 0.0
    }

    /// Outline vertices relative to the centre, before rotation.
    pub fn outline(&self) -> Vec<(f32, f32)> {
        star_outline(self.radius, self.curve)
    }
}

/// Ten-vertex outline (outer, inner, ...) starting at the top, unrotated.
pub fn star_outline(radius: f32, curve: f32) -> Vec<(f32, f32)> {
    let mut pts = Vec::with_capacity(STAR_POINTS * 2 + 1);
    pts.push((0.0, -radius));
    let mut a = 0.0f32;
    for _ in 0..STAR_POINTS {
        a += STAR_HALF_ANGLE;
        let r = radius * curve;
        pts.push((r * a.sin(), -r * a.cos()));
        a += STAR_HALF_ANGLE;
        pts.push((radius * a.sin(), -radius * a.cos()));
    }
    pts
}

#[derive(Clone, Debug)]
pub struct FallingStar {
    pub star: Star,
    pub falling: bool,
    pub vx: f32,
    pub vy: f32,
}

impl FallingStar {
    pub fn spawn<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        let mut star = Star::spawn(rng, width, height);
        star.y = rng.gen::<f32>() * height / 2.0;
        star.radius = rng.gen::<f32>() * STAR_SIZE * STAR_SIZE + STAR_SIZE * 2.0;
        Self {
            star,
            falling: false,
            vx: 0.0,
            vy: 0.0,
        }
    }

    fn advance(&mut self) {
        if !self.falling {
            self.star.twinkle(ENERGY_STEP * 4.0, 25.0);
            return;
        }
        let s = &mut self.star;
        s.energy -= ENERGY_STEP * 0.4;
        s.radius -= s.radius * ENERGY_STEP * 0.8;
        s.rotation += 0.08;
        self.vx += self.vx * 0.8;
        self.vy += self.vy * GRAVITY * 0.8;
    }

    /// Where the star is drawn this frame.
    pub fn draw_position(&self) -> (f32, f32) {
        (self.star.x + self.vx, self.star.y + self.vy)
    }

    /// Vertical squash while falling (energy squared).
    pub fn squash(&self) -> f32 {
        if self.falling {
            self.star.energy * self.star.energy
        } else {
            1.0
        }
    }

    pub fn hit(&self, x: f32, y: f32) -> bool {
        let reach = 2.0 * self.star.radius;
        x > self.star.x - reach
            && x < self.star.x + reach
            && y > self.star.y - reach
            && y < self.star.y + reach
    }
}

#[derive(Debug)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub falling: Option<FallingStar>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            stars: Vec::with_capacity(STAR_CAP),
            falling: None,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// One animation frame.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        if self.stars.len() < STAR_CAP {
            self.stars.push(Star::spawn(rng, self.width, self.height));
        }
        for star in &mut self.stars {
            star.twinkle(ENERGY_STEP, 50.0);
        }
        self.stars.retain(|s| !s.faded());

        if self.falling.is_none() && rng.gen::<f32>() < FALLING_CHANCE {
            self.falling = Some(FallingStar::spawn(rng, self.width, self.height));
        }
        if let Some(f) = &mut self.falling {
            f.advance();
            if f.star.energy < ENERGY_STEP {
                self.falling = None;
            }
        }
    }

    /// Pointer at (x, y): a touch on the falling star sends it falling away
    /// from the screen centre. Returns true if the star started to fall.
    pub fn touch<R: Rng>(&mut self, rng: &mut R, x: f32, y: f32) -> bool {
        let half_width = self.width / 2.0;
        let Some(f) = &mut self.falling else {
            return false;
        };
        if f.falling || !f.hit(x, y) {
            return false;
        }
        f.falling = true;
        f.star.energy = 1.0;
        f.star.radius *= 1.8;
        f.vy = 0.0008;
        let speed = rng.gen::<f32>() * 0.008 + 0.008;
        f.vx = if x > half_width { -speed } else { speed };
        true
    }
}

/// Backing size for the overlay canvas: the window size scaled by
/// `min(w / OVERLAY_MAX_WIDTH, h / OVERLAY_MAX_HEIGHT, 1)`; CSS stretches it
/// back to the window.
pub fn overlay_canvas_size(window_width: f64, window_height: f64) -> (u32, u32) {
    let scale = (window_width / OVERLAY_MAX_WIDTH)
        .min(window_height / OVERLAY_MAX_HEIGHT)
        .min(1.0);
    (
        (window_width * scale) as u32,
        (window_height * scale) as u32,
    )
}
