//! The sealed envelope that starts the celebration.

use crate::color::Hsla;
use crate::surface::{Point, Surface};

const WIDTH: f32 = 0.3;
const ASPECT: f32 = 0.6;
const FALL_GRAVITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopeState {
    Sealed,
    Falling { offset: f32, speed: f32 },
    Gone,
}

#[derive(Debug)]
pub struct Envelope {
    state: EnvelopeState,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl Envelope {
    pub fn new() -> Self {
        Self { state: EnvelopeState::Sealed }
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Returns `true` only for the activation that opens the envelope.
    pub fn activate(&mut self) -> bool {
        if self.state != EnvelopeState::Sealed {
            return false;
        }
        self.state = EnvelopeState::Falling { offset: 0.0, speed: 0.0 };
        true
    }

    pub fn is_visible(&self) -> bool {
        self.state != EnvelopeState::Gone
    }

    /// Rectangle as (left, top, width, height) in a `width x height` view.
    fn bounds(&self, width: f32, height: f32) -> (f32, f32, f32, f32) {
        let w = width * WIDTH;
        let h = w * ASPECT;
        let offset = match self.state {
            EnvelopeState::Falling { offset, .. } => offset,
            _ => 0.0,
        };
        ((width - w) / 2.0, (height - h) / 2.0 + offset, w, h)
    }

    pub fn contains(&self, point: Point, width: f32, height: f32) -> bool {
        if !self.is_visible() {
            return false;
        }
        let (left, top, w, h) = self.bounds(width, height);
        point.x >= left && point.x <= left + w && point.y >= top && point.y <= top + h
    }

    pub fn update(&mut self, height: f32) {
        if let EnvelopeState::Falling { offset, speed } = self.state {
            let speed = speed + FALL_GRAVITY;
            let offset = offset + speed;
            self.state = if offset > height {
                EnvelopeState::Gone
            } else {
                EnvelopeState::Falling { offset, speed }
            };
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_visible() {
            return;
        }
        let (left, top, w, h) = self.bounds(surface.width(), surface.height());
        let paper = Hsla::new(45.0, 90.0, 80.0, 1.0);
        let seal = Hsla::new(350.0, 85.0, 45.0, 1.0);

        let outline = [
            Point::new(left, top),
            Point::new(left + w, top),
            Point::new(left + w, top + h),
            Point::new(left, top + h),
            Point::new(left, top),
        ];
        surface.stroke_polyline(&outline, paper);

        let flap = [
            Point::new(left, top),
            Point::new(left + w / 2.0, top + h * 0.55),
            Point::new(left + w, top),
        ];
        surface.stroke_polyline(&flap, paper);
        surface.fill_circle(Point::new(left + w / 2.0, top + h * 0.55), w * 0.04, seal);
    }
}
