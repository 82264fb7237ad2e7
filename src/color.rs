/// A colour in hue/saturation/lightness form with straight alpha.
///
/// Hue is in degrees, saturation and lightness in percent, alpha in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self { hue, saturation, lightness, alpha }
    }

    pub fn white(alpha: f32) -> Self {
        Self::new(0.0, 0.0, 100.0, alpha)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        (
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgb(), (255, 0, 0));
        assert_eq!(Hsla::new(120.0, 100.0, 50.0, 1.0).to_rgb(), (0, 255, 0));
        assert_eq!(Hsla::new(240.0, 100.0, 50.0, 1.0).to_rgb(), (0, 0, 255));
        assert_eq!(Hsla::new(180.0, 100.0, 50.0, 1.0).to_rgb(), (0, 255, 255));
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(Hsla::white(1.0).to_rgb(), (255, 255, 255));
        assert_eq!(Hsla::new(200.0, 100.0, 0.0, 1.0).to_rgb(), (0, 0, 0));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(
            Hsla::new(360.0, 100.0, 50.0, 1.0).to_rgb(),
            Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgb()
        );
        assert_eq!(
            Hsla::new(-120.0, 100.0, 50.0, 1.0).to_rgb(),
            Hsla::new(240.0, 100.0, 50.0, 1.0).to_rgb()
        );
    }
}
