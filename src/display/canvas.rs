/// Software framebuffer the game is composed into before it reaches the
/// terminal.
///
/// Pixels are square.  World x in [0, 1] spans the full width; world y is
/// centred on the middle row with the same scale as x.

use crate::assets::Texture;
use crate::entities::Vec2;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

/// How a quad combines with what is already on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Blend {
    /// Overwrite, ignoring texture alpha.
    Opaque,
    /// Source-over blending, with texture alpha scaled by the given factor.
    Alpha(f32),
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Half the visible world height.
    pub fn y_size(&self) -> f32 {
        self.height as f32 / (self.width as f32 * 2.0)
    }

    /// World position → canvas pixel coordinates (not rounded).
    pub fn project(&self, p: Vec2) -> (f32, f32) {
        let w = self.width as f32;
        (p.x * w, p.y * w + self.height as f32 / 2.0)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, src: Rgb, alpha: f32) {
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        for c in 0..3 {
            let mixed = src[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Pixel span covering [lo, hi) in one axis, clipped to `limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let start = lo.round().max(0.0) as u32;
        let end = hi.round().clamp(0.0, limit as f32) as u32;
        start.min(end)..end
    }

    /// Draw `tex` across the world rectangle `min`..`max`.  `uv_offset` shifts
    /// the texture horizontally; the texture wraps.
    pub fn textured_quad(&mut self, min: Vec2, max: Vec2, tex: &Texture, uv_offset: f32, blend: Blend) {
        let (x0, y0) = self.project(min);
        let (x1, y1) = self.project(max);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        for py in Self::span(y0, y1, self.height) {
            let v = (py as f32 + 0.5 - y0) / (y1 - y0);
            for px in Self::span(x0, x1, self.width) {
                let u = (px as f32 + 0.5 - x0) / (x1 - x0) + uv_offset;
                let [r, g, b, a] = tex.sample(u, v);
                match blend {
                    Blend::Opaque => self.blend_pixel(px, py, [r, g, b], 1.0),
                    Blend::Alpha(fac) => {
                        let alpha = (a as f32 / 255.0 * fac).clamp(0.0, 1.0);
                        if alpha > 0.0 {
                            self.blend_pixel(px, py, [r, g, b], alpha);
                        }
                    }
                }
            }
        }
    }

    /// Black overlay over the whole canvas whose opacity runs linearly from
    /// `left` at the left edge to `right` at the right edge.
    pub fn gradient(&mut self, left: f32, right: f32) {
        let w = self.width as f32;
        for px in 0..self.width {
            let t = (px as f32 + 0.5) / w;
            let alpha = (left + (right - left) * t).clamp(0.0, 1.0);
            if alpha <= 0.0 {
                continue;
            }
            for py in 0..self.height {
                self.blend_pixel(px, py, BLACK, alpha);
            }
        }
    }
}
