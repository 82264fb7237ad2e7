use fastrand::Rng;

pub mod firework;
pub mod floating_text;
pub mod particle;

pub use firework::{Burst, Firework};
pub use floating_text::FloatingText;
pub use particle::Particle;

/// Uniform sample from `[min, max)`.
pub fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    rng.f32() * (max - min) + min
}

/// The live entities of each kind.
#[derive(Debug, Default)]
pub struct Populations {
    pub fireworks: Vec<Firework>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
}

impl Populations {
    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty() && self.particles.is_empty() && self.texts.is_empty()
    }
}
