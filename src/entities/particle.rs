use super::random_range;
use crate::color::Hsla;
use crate::surface::{Blend, Point, Surface};
use fastrand::Rng;
use std::f32::consts::PI;

pub const FRICTION: f32 = 0.95;
pub const GRAVITY: f32 = 0.2;
pub const RADIUS: f32 = 2.0;

/// One fragment of an explosion.
#[derive(Debug, Clone)]
pub struct Particle {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) vx: f32,
    pub(crate) vy: f32,
    pub(crate) hue: f32,
    pub(crate) brightness: f32,
    pub(crate) friction: f32,
    pub(crate) gravity: f32,
    pub(crate) opacity: f32,
    pub(crate) decay: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, hue: f32, rng: &mut Rng) -> Self {
        let angle = random_range(rng, 0.0, PI * 2.0);
        let speed = random_range(rng, 1.0, 8.0);
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            hue,
            brightness: random_range(rng, 50.0, 80.0),
            friction: FRICTION,
            gravity: GRAVITY,
            opacity: 1.0,
            decay: random_range(rng, 0.01, 0.03),
        }
    }

    pub fn update(&mut self) {
        self.vx *= self.friction;
        self.vy *= self.friction;
        self.vy += self.gravity;
        self.x += self.vx;
        self.y += self.vy;
        self.opacity -= self.decay;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_blend(Blend::Lighter);
        surface.fill_circle(
            Point::new(self.x, self.y),
            RADIUS,
            Hsla::new(self.hue, 100.0, self.brightness, self.opacity),
        );
        surface.set_blend(Blend::SourceOver);
    }

    pub fn is_dead(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawCall, RecordingSurface};

    fn still_particle(decay: f32) -> Particle {
        Particle {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            hue: 30.0,
            brightness: 60.0,
            friction: FRICTION,
            gravity: GRAVITY,
            opacity: 1.0,
            decay,
        }
    }

    #[test]
    fn test_random_parameters_in_range() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..500 {
            let p = Particle::new(10.0, 20.0, 90.0, &mut rng);
            assert!((0.01..0.03).contains(&p.decay));
            assert!((50.0..80.0).contains(&p.brightness));
            let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
            assert!(speed >= 1.0 - 1e-4 && speed < 8.0 + 1e-4, "speed {}", speed);
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.position(), Point::new(10.0, 20.0));
        }
    }

    #[test]
    fn test_opacity_strictly_decreases() {
        let mut rng = Rng::with_seed(11);
        let mut p = Particle::new(0.0, 0.0, 0.0, &mut rng);
        let mut last = p.opacity;
        while !p.is_dead() {
            p.update();
            assert!(p.opacity < last);
            last = p.opacity;
        }
    }

    #[test]
    fn test_dies_after_ceil_inverse_decay_updates() {
        // Decays that are exact in binary so the count is exact too.
        for (decay, expected) in [(0.0625, 16), (0.015625, 64), (0.03125, 32)] {
            let mut p = still_particle(decay);
            let mut updates = 0;
            while !p.is_dead() {
                p.update();
                updates += 1;
            }
            assert_eq!(updates, expected, "decay {}", decay);
        }
    }

    #[test]
    fn test_friction_and_gravity() {
        let mut p = still_particle(0.01);
        p.vx = 10.0;
        p.vy = -10.0;
        p.update();
        assert!((p.vx - 9.5).abs() < 1e-5);
        assert!((p.vy - (-9.5 + 0.2)).abs() < 1e-5);
        assert!((p.x - 9.5).abs() < 1e-5);
        assert!((p.y - (-9.3)).abs() < 1e-5);
    }

    #[test]
    fn test_draw_uses_additive_blend_then_restores() {
        let p = still_particle(0.02);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        p.draw(&mut surface);
        assert_eq!(surface.calls.first(), Some(&DrawCall::Blend(Blend::Lighter)));
        assert_eq!(surface.calls.last(), Some(&DrawCall::Blend(Blend::SourceOver)));
        match &surface.calls[1] {
            DrawCall::Circle { radius, color, blend, .. } => {
                assert_eq!(*radius, RADIUS);
                assert_eq!(*blend, Blend::Lighter);
                assert_eq!(color.hue, 30.0);
                assert_eq!(color.alpha, 1.0);
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }
}
