use crate::color::Hsla;
use crate::font;
use crate::surface::{Blend, Point, Surface};
use std::io::{self, Write};

/// Premultiplied RGBA, each channel in 0..=1.
type Pixel = [f32; 4];

const CLEAR: Pixel = [0.0; 4];

/// Below this a pixel is treated as fully erased.
const EPSILON: f32 = 1.0 / 512.0;

/// Terminal-backed drawing surface.
///
/// Each terminal cell holds two vertically stacked pixels drawn with an
/// upper-half-block glyph, so a `cols x rows` terminal is a `cols x rows*2`
/// pixel grid. Callers draw in logical pixels; `scale` logical pixels map to
/// one terminal pixel.
pub struct Canvas {
    width: usize,
    height: usize,
    scale: f32,
    pixels: Vec<Pixel>,
    blend: Blend,
    bg_color: (u8, u8, u8),
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize, scale: f32, bg_color: (u8, u8, u8)) -> Self {
        let width = cols;
        let height = rows * 2;
        Self {
            width,
            height,
            scale,
            pixels: vec![CLEAR; width * height],
            blend: Blend::SourceOver,
            bg_color,
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.width = cols;
        self.height = rows * 2;
        self.pixels = vec![CLEAR; self.width * self.height];
        self.output_buf = Vec::with_capacity(self.width * self.height * 25);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Logical position of the centre of a terminal cell.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.scale,
            (row as f32 * 2.0 + 1.0) * self.scale,
        )
    }

    /// Premultiplied colour of the terminal pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// What the pixel looks like once composited over the background.
    pub fn shown_color(&self, x: usize, y: usize) -> (u8, u8, u8) {
        self.composite_over_bg(self.pixels[y * self.width + x])
    }

    fn composite_over_bg(&self, p: Pixel) -> (u8, u8, u8) {
        let a = p[3].clamp(0.0, 1.0);
        let channel = |bg: u8, c: f32| -> u8 {
            (bg as f32 * (1.0 - a) + c.clamp(0.0, 1.0) * 255.0).round().min(255.0) as u8
        };
        (
            channel(self.bg_color.0, p[0]),
            channel(self.bg_color.1, p[1]),
            channel(self.bg_color.2, p[2]),
        )
    }

    fn premultiply(color: Hsla, alpha_scale: f32) -> Pixel {
        let a = (color.alpha * alpha_scale).clamp(0.0, 1.0);
        let (r, g, b) = color.to_rgb();
        [
            r as f32 / 255.0 * a,
            g as f32 / 255.0 * a,
            b as f32 / 255.0 * a,
            a,
        ]
    }

    fn plot(&mut self, x: i32, y: i32, src: Pixel) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        if src[3] <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[y as usize * self.width + x as usize];
        match self.blend {
            Blend::SourceOver => {
                let keep = 1.0 - src[3];
                for i in 0..4 {
                    dst[i] = src[i] + dst[i] * keep;
                }
            }
            Blend::Lighter => {
                for i in 0..4 {
                    dst[i] = (src[i] + dst[i]).min(1.0);
                }
            }
        }
    }

    fn to_px(&self, v: f32) -> f32 {
        v / self.scale
    }

    /// Rasterise the glyphs of `text` into a mask covering terminal pixels.
    /// Every dot lights at least one pixel, so small text stays legible.
    fn text_mask(&self, text: &str, center: Point, size: f32) -> Option<TextMask> {
        let (dots_w, dots_h) = font::dot_extent(text);
        if dots_w == 0 || size <= 0.0 {
            return None;
        }

        let dot = size / font::LINE as f32;
        let origin_x = center.x - dots_w as f32 * dot / 2.0;
        let origin_y = center.y - dots_h as f32 * dot / 2.0;

        let left = self.to_px(origin_x).floor() as i32;
        let top = self.to_px(origin_y).floor() as i32;
        let right = self.to_px(origin_x + dots_w as f32 * dot).ceil() as i32;
        let bottom = self.to_px(origin_y + dots_h as f32 * dot).ceil() as i32;
        let mut mask = TextMask::new(left, top, (right - left).max(1), (bottom - top).max(1));

        for (i, c) in text.chars().enumerate() {
            for row in 0..font::GLYPH_HEIGHT {
                for col in 0..font::GLYPH_WIDTH {
                    if !font::is_lit(c, col, row) {
                        continue;
                    }
                    let x0 = origin_x + (i * font::ADVANCE + col) as f32 * dot;
                    let y0 = origin_y + row as f32 * dot;
                    let px0 = self.to_px(x0).floor() as i32;
                    let py0 = self.to_px(y0).floor() as i32;
                    let px1 = (self.to_px(x0 + dot).ceil() as i32 - 1).max(px0);
                    let py1 = (self.to_px(y0 + dot).ceil() as i32 - 1).max(py0);
                    for py in py0..=py1 {
                        for px in px0..=px1 {
                            mask.set(px, py);
                        }
                    }
                }
            }
        }

        Some(mask)
    }

    /// Write the frame to `out` as half-block cells.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top_color: (u8, u8, u8) = (255, 255, 255);
        let mut prev_bot_color: (u8, u8, u8) = (255, 255, 255);

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top_idx = y * self.width + x;
                let bot_idx = if y + 1 < self.height {
                    (y + 1) * self.width + x
                } else {
                    top_idx
                };

                let top_color = self.composite_over_bg(self.pixels[top_idx]);
                let bot_color = self.composite_over_bg(self.pixels[bot_idx]);

                if top_color != prev_top_color {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = top_color;
                }
                if bot_color != prev_bot_color {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = bot_color;
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top_color = (255, 255, 255);
            prev_bot_color = (255, 255, 255);
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

struct TextMask {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    lit: Vec<bool>,
}

impl TextMask {
    fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height, lit: vec![false; (width * height) as usize] }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (lx, ly) = (x - self.left, y - self.top);
        if lx < 0 || ly < 0 || lx >= self.width || ly >= self.height {
            return None;
        }
        Some((ly * self.width + lx) as usize)
    }

    fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.lit[i] = true;
        }
    }

    fn is_lit(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.lit[i])
    }

    fn lit_pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |ly| {
            (0..self.width)
                .filter(move |&lx| self.lit[(ly * self.width + lx) as usize])
                .map(move |lx| (lx + self.left, ly + self.top))
        })
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.height as f32 * self.scale
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    fn fade(&mut self, amount: f32) {
        let keep = (1.0 - amount).clamp(0.0, 1.0);
        for p in &mut self.pixels {
            if p[3] * keep < EPSILON {
                *p = CLEAR;
            } else {
                for c in p.iter_mut() {
                    *c *= keep;
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Hsla) {
        let src = Self::premultiply(color, 1.0);
        let cx = self.to_px(center.x);
        let cy = self.to_px(center.y);
        let r = self.to_px(radius);
        let (home_x, home_y) = (cx.floor() as i32, cy.floor() as i32);

        for py in (cy - r).floor() as i32..=(cy + r).floor() as i32 {
            for px in (cx - r).floor() as i32..=(cx + r).floor() as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r || (px == home_x && py == home_y) {
                    self.plot(px, py, src);
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Hsla) {
        let src = Self::premultiply(color, 1.0);
        for (i, pair) in points.windows(2).enumerate() {
            let (x0, y0) = (self.to_px(pair[0].x), self.to_px(pair[0].y));
            let (x1, y1) = (self.to_px(pair[1].x), self.to_px(pair[1].y));
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i32;

            let mut last = None;
            // Joints belong to the previous segment.
            let first = if i == 0 { 0 } else { 1 };
            for s in first..=steps {
                let t = s as f32 / steps as f32;
                let px = (x0 + (x1 - x0) * t).floor() as i32;
                let py = (y0 + (y1 - y0) * t).floor() as i32;
                if last == Some((px, py)) {
                    continue;
                }
                last = Some((px, py));
                self.plot(px, py, src);
            }
        }
    }

    fn fill_text(&mut self, text: &str, center: Point, size: f32, fill: Hsla, glow: Hsla, blur: f32) {
        let Some(mask) = self.text_mask(text, center, size) else {
            return;
        };

        let reach = self.to_px(blur).ceil().max(0.0) as i32;
        if reach > 0 && glow.alpha > 0.0 {
            let halo_w = mask.width + reach * 2;
            let halo_h = mask.height + reach * 2;
            let mut halo = vec![0.0f32; (halo_w * halo_h) as usize];

            for (x, y) in mask.lit_pixels() {
                for dy in -reach..=reach {
                    for dx in -reach..=reach {
                        let d = ((dx * dx + dy * dy) as f32).sqrt();
                        if d > reach as f32 {
                            continue;
                        }
                        let strength = 1.0 - d / (reach as f32 + 1.0);
                        let hx = x + dx - mask.left + reach;
                        let hy = y + dy - mask.top + reach;
                        let h = &mut halo[(hy * halo_w + hx) as usize];
                        if strength > *h {
                            *h = strength;
                        }
                    }
                }
            }

            for hy in 0..halo_h {
                for hx in 0..halo_w {
                    let strength = halo[(hy * halo_w + hx) as usize];
                    let x = hx + mask.left - reach;
                    let y = hy + mask.top - reach;
                    if strength <= 0.0 || mask.is_lit(x, y) {
                        continue;
                    }
                    self.plot(x, y, Self::premultiply(glow, strength * 0.6));
                }
            }
        }

        let src = Self::premultiply(fill, 1.0);
        for (x, y) in mask.lit_pixels() {
            self.plot(x, y, src);
        }
    }
}
