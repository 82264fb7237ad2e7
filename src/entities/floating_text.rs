use crate::color::Hsla;
use crate::surface::{Point, Surface};

pub const MAX_SIZE: f32 = 60.0;
pub const GROWTH: f32 = 2.0;
pub const RISE: f32 = 0.5;
pub const MAX_AGE: u32 = 150;
/// Frames at full opacity before the caption starts to fade.
pub const HOLD: u32 = 100;
pub const FADE: f32 = 0.02;
pub const GLOW_BLUR: f32 = 20.0;

/// A caption that pops out of a text explosion, grows, drifts up and fades.
#[derive(Debug, Clone)]
pub struct FloatingText {
    x: f32,
    y: f32,
    text: String,
    hue: f32,
    opacity: f32,
    size: f32,
    max_size: f32,
    age: u32,
    max_age: u32,
}

impl FloatingText {
    pub fn new(x: f32, y: f32, text: impl Into<String>, hue: f32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            hue,
            opacity: 1.0,
            size: 0.0,
            max_size: MAX_SIZE,
            age: 0,
            max_age: MAX_AGE,
        }
    }

    pub fn update(&mut self) {
        self.age += 1;
        if self.size < self.max_size {
            self.size = (self.size + GROWTH).min(self.max_size);
        }
        self.y -= RISE;
        if self.age > HOLD {
            self.opacity -= FADE;
        }
        // Float error would otherwise leave a sliver of opacity at the end.
        if self.age >= self.max_age {
            self.opacity = 0.0;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &self.text,
            Point::new(self.x, self.y),
            self.size,
            Hsla::white(self.opacity),
            Hsla::new(self.hue, 100.0, 50.0, self.opacity),
            GLOW_BLUR,
        );
    }

    pub fn is_dead(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}
