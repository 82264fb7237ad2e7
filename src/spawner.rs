//! Creation of fireworks, explosions and captions.
//!
//! All randomness goes through the spawner's [`Rng`], so a seeded spawner
//! produces the same show every time.

use crate::entities::{random_range, Burst, Firework, FloatingText, Particle, Populations};
use crate::sequence::{SequenceItem, TARGET_HEIGHT};
use fastrand::Rng;

/// Particles per explosion.
pub const EXPLOSION_SIZE: usize = 60;
/// Maximum offset of a click's second pop along each axis.
pub const JITTER: f32 = 30.0;

pub struct Spawner {
    rng: Rng,
}

impl Spawner {
    pub fn new(rng: Rng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Rng::with_seed(seed))
    }

    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Burst of [`EXPLOSION_SIZE`] particles at (`x`, `y`). Without a hue
    /// every particle picks its own, giving a rainbow burst.
    pub fn create_explosion(&mut self, pops: &mut Populations, x: f32, y: f32, hue: Option<f32>) {
        pops.particles.reserve(EXPLOSION_SIZE);
        for _ in 0..EXPLOSION_SIZE {
            let hue = match hue {
                Some(hue) => hue,
                None => random_range(&mut self.rng, 0.0, 360.0),
            };
            pops.particles.push(Particle::new(x, y, hue, &mut self.rng));
        }
    }

    /// A caption plus a single-hue explosion at the same point.
    pub fn create_text_explosion(&mut self, pops: &mut Populations, x: f32, y: f32, text: &str, hue: f32) {
        pops.texts.push(FloatingText::new(x, y, text, hue));
        self.create_explosion(pops, x, y, Some(hue));
    }

    pub fn burst(&mut self, pops: &mut Populations, burst: Burst) {
        match burst {
            Burst::Plain { x, y, hue } => self.create_explosion(pops, x, y, Some(hue)),
            Burst::Text { x, y, text, hue } => self.create_text_explosion(pops, x, y, &text, hue),
        }
    }

    /// A rocket from somewhere in the middle band, bursting in the upper half.
    pub fn ambient_firework(&mut self, width: f32, height: f32) -> Firework {
        let x = random_range(&mut self.rng, width * 0.1, width * 0.9);
        let target_y = random_range(&mut self.rng, height * 0.1, height * 0.5);
        Firework::launch(x, height, target_y, &mut self.rng)
    }

    /// Launch an ambient rocket with probability `chance`.
    pub fn maybe_spawn_ambient(&mut self, pops: &mut Populations, chance: f32, width: f32, height: f32) -> bool {
        if self.rng.f32() < chance {
            let firework = self.ambient_firework(width, height);
            pops.fireworks.push(firework);
            true
        } else {
            false
        }
    }

    pub fn captioned_firework(&mut self, item: &SequenceItem, width: f32, height: f32) -> Firework {
        let firework = Firework::launch(width * item.x, height, height * TARGET_HEIGHT, &mut self.rng)
            .with_text(item.text.as_str());
        match item.hue {
            Some(hue) => firework.with_hue(hue),
            None => firework,
        }
    }

    /// (`x`, `y`) moved by up to [`JITTER`] along each axis.
    pub fn jitter(&mut self, x: f32, y: f32) -> (f32, f32) {
        (
            x + random_range(&mut self.rng, -JITTER, JITTER),
            y + random_range(&mut self.rng, -JITTER, JITTER),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_hue_is_shared() {
        let mut spawner = Spawner::with_seed(42);
        let mut pops = Populations::default();
        spawner.create_explosion(&mut pops, 10.0, 20.0, Some(200.0));
        assert_eq!(pops.particles.len(), EXPLOSION_SIZE);
        assert!(pops.particles.iter().all(|p| p.hue() == 200.0));
        assert!(pops.particles.iter().all(|p| p.position().x == 10.0 && p.position().y == 20.0));
    }

    #[test]
    fn test_zero_hue_is_still_explicit() {
        let mut spawner = Spawner::with_seed(42);
        let mut pops = Populations::default();
        spawner.create_explosion(&mut pops, 0.0, 0.0, Some(0.0));
        assert!(pops.particles.iter().all(|p| p.hue() == 0.0));
    }

    #[test]
    fn test_missing_hue_gives_rainbow() {
        let mut spawner = Spawner::with_seed(42);
        let mut pops = Populations::default();
        spawner.create_explosion(&mut pops, 0.0, 0.0, None);
        assert_eq!(pops.particles.len(), EXPLOSION_SIZE);
        let first = pops.particles[0].hue();
        assert!(pops.particles.iter().any(|p| p.hue() != first));
        assert!(pops.particles.iter().all(|p| (0.0..360.0).contains(&p.hue())));
    }

    #[test]
    fn test_text_explosion() {
        let mut spawner = Spawner::with_seed(1);
        let mut pops = Populations::default();
        spawner.create_text_explosion(&mut pops, 5.0, 6.0, "New", 90.0);
        assert_eq!(pops.texts.len(), 1);
        assert_eq!(pops.texts[0].text(), "New");
        assert_eq!(pops.texts[0].hue(), 90.0);
        assert_eq!(pops.particles.len(), EXPLOSION_SIZE);
        assert!(pops.particles.iter().all(|p| p.hue() == 90.0));
    }

    #[test]
    fn test_ambient_firework_bounds() {
        let mut spawner = Spawner::with_seed(9);
        for _ in 0..500 {
            let fw = spawner.ambient_firework(1000.0, 800.0);
            let p = fw.position();
            assert!((100.0..900.0).contains(&p.x));
            assert_eq!(p.y, 800.0);
            assert!((80.0..400.0).contains(&fw.target_y()));
            assert_eq!(fw.text(), None);
        }
    }

    #[test]
    fn test_ambient_chance_extremes() {
        let mut spawner = Spawner::with_seed(5);
        let mut pops = Populations::default();
        for _ in 0..100 {
            assert!(!spawner.maybe_spawn_ambient(&mut pops, 0.0, 100.0, 100.0));
        }
        assert!(pops.fireworks.is_empty());
        for _ in 0..100 {
            assert!(spawner.maybe_spawn_ambient(&mut pops, 1.0, 100.0, 100.0));
        }
        assert_eq!(pops.fireworks.len(), 100);
    }

    #[test]
    fn test_captioned_firework() {
        let mut spawner = Spawner::with_seed(2);
        let item = SequenceItem::new("2026", 5500, 0.5).with_hue(180.0);
        let fw = spawner.captioned_firework(&item, 1000.0, 800.0);
        assert_eq!(fw.position().x, 500.0);
        assert_eq!(fw.position().y, 800.0);
        assert!((fw.target_y() - 240.0).abs() < 1e-3);
        assert_eq!(fw.text(), Some("2026"));
        assert_eq!(fw.hue(), 180.0);

        let plain = spawner.captioned_firework(&SequenceItem::new("Happy", 1000, 0.2), 1000.0, 800.0);
        assert_eq!(plain.position().x, 200.0);
        assert_eq!(plain.text(), Some("Happy"));
    }

    #[test]
    fn test_jitter_is_bounded() {
        let mut spawner = Spawner::with_seed(13);
        for _ in 0..1000 {
            let (x, y) = spawner.jitter(100.0, 200.0);
            assert!((x - 100.0).abs() <= JITTER);
            assert!((y - 200.0).abs() <= JITTER);
        }
    }

    #[test]
    fn test_same_seed_same_show() {
        let mut a = Spawner::with_seed(77);
        let mut b = Spawner::with_seed(77);
        let (mut pa, mut pb) = (Populations::default(), Populations::default());
        a.create_explosion(&mut pa, 0.0, 0.0, None);
        b.create_explosion(&mut pb, 0.0, 0.0, None);
        let ha: Vec<f32> = pa.particles.iter().map(|p| p.hue()).collect();
        let hb: Vec<f32> = pb.particles.iter().map(|p| p.hue()).collect();
        assert_eq!(ha, hb);
    }
}
