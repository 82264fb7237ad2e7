use super::random_range;
use crate::color::Hsla;
use crate::surface::{Point, Surface};
use fastrand::Rng;
use std::collections::VecDeque;
use std::f32::consts::PI;

pub const TRAIL_LENGTH: usize = 5;
pub const GRAVITY: f32 = 0.05;
pub const LAUNCH_SPEED: f32 = 3.0;
pub const HEAD_RADIUS: f32 = 2.0;

/// What a firework leaves behind when it bursts.
#[derive(Debug, Clone, PartialEq)]
pub enum Burst {
    Plain { x: f32, y: f32, hue: f32 },
    Text { x: f32, y: f32, text: String, hue: f32 },
}

/// A rocket climbing from the bottom edge towards its burst height.
#[derive(Debug, Clone)]
pub struct Firework {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) target_y: f32,
    pub(crate) angle: f32,
    pub(crate) vx: f32,
    pub(crate) vy: f32,
    pub(crate) hue: f32,
    pub(crate) brightness: f32,
    pub(crate) opacity: f32,
    pub(crate) trail: VecDeque<Point>,
    pub(crate) text: Option<String>,
    pub(crate) dead: bool,
}

impl Firework {
    /// Launch straight up from (`x`, `ground`) aiming to burst at `target_y`.
    pub fn launch(x: f32, ground: f32, target_y: f32, rng: &mut Rng) -> Self {
        let angle = -PI / 2.0;
        Self {
            x,
            y: ground,
            target_y,
            angle,
            vx: angle.cos() * LAUNCH_SPEED,
            vy: angle.sin() * LAUNCH_SPEED * random_range(rng, 3.0, 5.0),
            hue: random_range(rng, 0.0, 360.0),
            brightness: random_range(rng, 50.0, 80.0),
            opacity: 1.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            text: None,
            dead: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = hue;
        self
    }

    /// Advance one frame. Returns the burst on the frame the rocket dies.
    pub fn update(&mut self) -> Option<Burst> {
        if self.dead {
            return None;
        }

        self.trail.push_back(Point::new(self.x, self.y));
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;

        if self.vy >= 0.0 || self.y <= self.target_y {
            self.dead = true;
            let burst = match &self.text {
                Some(text) => Burst::Text { x: self.x, y: self.y, text: text.clone(), hue: self.hue },
                None => Burst::Plain { x: self.x, y: self.y, hue: self.hue },
            };
            return Some(burst);
        }
        None
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = Hsla::new(self.hue, 100.0, self.brightness, self.opacity);
        if self.trail.len() > 1 {
            let points: Vec<Point> = self.trail.iter().copied().collect();
            surface.stroke_polyline(&points, color);
        }
        surface.fill_circle(Point::new(self.x, self.y), HEAD_RADIUS, color);
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn target_y(&self) -> f32 {
        self.target_y
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn trail(&self) -> impl Iterator<Item = &Point> {
        self.trail.iter()
    }
}
