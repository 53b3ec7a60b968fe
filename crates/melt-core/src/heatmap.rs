//! The decaying cursor-trail raster sampled by the particle shader.
//!
//! Every frame the whole buffer is faded toward its background colour, then
//! a glow sprite is composited with a lighten blend at the picked location.
//! The buffer is never cleared, so trails linger and overlap smoothly.

use crate::constants::{BACKGROUND_RGB, GLOW_SPRITE_SIZE};
use crate::error::MeltError;
use glam::Vec2;

/// Straight-alpha RGBA sprite stamped onto the heat-map.
#[derive(Clone, Debug)]
pub struct GlowSprite {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Default for GlowSprite {
    fn default() -> Self {
        Self::radial(GLOW_SPRITE_SIZE)
    }
}

impl GlowSprite {
    /// White disc whose alpha falls off quadratically to zero at the rim.
    pub fn radial(size: u32) -> Self {
        let size = size.max(1);
        let r = size as f32 * 0.5;
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                let d = ((dx * dx + dy * dy).sqrt() / r).min(1.0);
                let a = (1.0 - d) * (1.0 - d);
                pixels.push([1.0, 1.0, 1.0, a]);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self, MeltError> {
        if bytes.is_empty() {
            return Err(MeltError::EmptyImage);
        }
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(MeltError::EmptyImage);
        }
        let pixels = rgba
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bilinear sample with clamp-to-edge, `u`, `v` in [0, 1].
    fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;
        let at = |x: u32, y: u32| self.pixels[(y * self.width + x) as usize];
        let (a, b, c, d) = (at(x0, y0), at(x1, y0), at(x0, y1), at(x1, y1));
        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct HeatMap {
    width: u32,
    height: u32,
    background: [f32; 3],
    pixels: Vec<[f32; 3]>,
    dirty: bool,
}

impl HeatMap {
    /// Square raster filled with the default background.
    pub fn new(size: u32) -> Self {
        Self::with_background(size, size, BACKGROUND_RGB)
    }

    pub fn with_background(width: u32, height: u32, background: [f32; 3]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            background,
            pixels: vec![background; (width * height) as usize],
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Source-over fill of the background colour at weight `alpha`.
    pub fn fade(&mut self, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        let bg = self.background;
        for p in &mut self.pixels {
            for c in 0..3 {
                p[c] += (bg[c] - p[c]) * a;
            }
        }
        self.dirty = true;
    }

    /// Lighten-composite `sprite` as a `size` x `size` square centred on
    /// `center` (raster pixels). Never darkens any channel.
    pub fn draw_glow(&mut self, sprite: &GlowSprite, center: Vec2, size: f32) {
        if size.is_nan() || size <= 0.0 || !center.is_finite() {
            return;
        }
        let x0 = center.x - size * 0.5;
        let y0 = center.y - size * 0.5;
        let px_min = x0.floor().clamp(0.0, self.width as f32) as u32;
        let py_min = y0.floor().clamp(0.0, self.height as f32) as u32;
        let px_max = (x0 + size).ceil().clamp(0.0, self.width as f32) as u32;
        let py_max = (y0 + size).ceil().clamp(0.0, self.height as f32) as u32;

        for py in py_min..py_max {
            let v = (py as f32 + 0.5 - y0) / size;
            if !(0.0..=1.0).contains(&v) {
                continue;
            }
            for px in px_min..px_max {
                let u = (px as f32 + 0.5 - x0) / size;
                if !(0.0..=1.0).contains(&u) {
                    continue;
                }
                let s = sprite.sample(u, v);
                let a = s[3].clamp(0.0, 1.0);
                if a <= 0.0 {
                    continue;
                }
                let d = &mut self.pixels[(py * self.width + px) as usize];
                for c in 0..3 {
                    let lighter = s[c].max(d[c]);
                    d[c] += (lighter - d[c]) * a;
                }
            }
        }
        self.dirty = true;
    }

    /// Bilinear red-channel sample at a particle uv (v up), matching the
    /// orientation the GPU texture is sampled with.
    pub fn sample_red(&self, uv: Vec2) -> f32 {
        let fx = (uv.x * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = ((1.0 - uv.y) * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;
        let top = self.pixel(x0, y0)[0] + (self.pixel(x1, y0)[0] - self.pixel(x0, y0)[0]) * tx;
        let bottom = self.pixel(x0, y1)[0] + (self.pixel(x1, y1)[0] - self.pixel(x0, y1)[0]) * tx;
        top + (bottom - top) * ty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether an upload is due and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Row-major RGBA8 bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.push((p[0].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push((p[1].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push((p[2].clamp(0.0, 1.0) * 255.0).round() as u8);
            out.push(255);
        }
        out
    }
}
