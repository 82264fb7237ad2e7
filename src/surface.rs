use crate::color::Hsla;

/// A position in logical pixels, origin top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How a draw call combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Paint on top, occluding by alpha.
    #[default]
    SourceOver,
    /// Add light; overlapping draws brighten instead of covering each other.
    Lighter,
}

/// Everything the show needs from whatever it draws on.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn set_blend(&mut self, blend: Blend);

    /// Erase a fraction `amount` of everything drawn so far.
    fn fade(&mut self, amount: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Hsla);

    fn stroke_polyline(&mut self, points: &[Point], color: Hsla);

    /// Draw `text` centred on `center` at font size `size`, with a halo of
    /// `glow` spreading `blur` pixels around the glyphs.
    fn fill_text(&mut self, text: &str, center: Point, size: f32, fill: Hsla, glow: Hsla, blur: f32);
}
