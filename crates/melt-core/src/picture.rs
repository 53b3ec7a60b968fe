//! The source picture whose brightness sizes and colours the particles.

use crate::constants::MAX_PICTURE_DIMENSION;
use crate::error::MeltError;
use glam::Vec2;
use image::imageops::FilterType;

/// Decoded RGBA8 picture, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl SourceImage {
    /// Decode any supported container (PNG, JPEG, GIF, BMP, WebP).
    /// Pictures wider or taller than `MAX_PICTURE_DIMENSION` are downscaled.
    pub fn decode(bytes: &[u8]) -> Result<Self, MeltError> {
        if bytes.is_empty() {
            return Err(MeltError::EmptyImage);
        }
        let mut img = image::load_from_memory(bytes)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(MeltError::EmptyImage);
        }
        if img.width() > MAX_PICTURE_DIMENSION || img.height() > MAX_PICTURE_DIMENSION {
            log::info!(
                "[picture] downscaling {}x{} to fit {}",
                img.width(),
                img.height(),
                MAX_PICTURE_DIMENSION
            );
            img = img.resize(
                MAX_PICTURE_DIMENSION,
                MAX_PICTURE_DIMENSION,
                FilterType::Triangle,
            );
        }
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Decode after checking the MIME type reported by a file picker.
    pub fn decode_with_mime(bytes: &[u8], mime: &str) -> Result<Self, MeltError> {
        if !accepts_mime(mime) {
            return Err(MeltError::UnsupportedMime(mime.to_string()));
        }
        Self::decode(bytes)
    }

    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, MeltError> {
        if width == 0 || height == 0 {
            return Err(MeltError::EmptyImage);
        }
        let expected = (width * height * 4) as usize;
        if rgba.len() != expected {
            return Err(MeltError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Procedural stand-in used when no picture asset could be loaded:
    /// a bright centre fading outward with soft concentric rings.
    pub fn placeholder(size: u32) -> Self {
        let size = size.max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let d = (dx * dx + dy * dy).sqrt();
                let falloff = (1.0 - d * 0.8).clamp(0.0, 1.0);
                let rings = 0.75 + 0.25 * (d * 18.0).cos();
                let lum = (falloff * rings * 255.0).round() as u8;
                rgba.extend_from_slice(&[lum, lum, lum, 255]);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Bilinear red-channel sample in [0, 1] at a particle uv (v up).
    pub fn sample_red(&self, uv: Vec2) -> f32 {
        let fx = (uv.x * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = ((1.0 - uv.y) * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;
        let red = |x: u32, y: u32| self.rgba[((y * self.width + x) * 4) as usize] as f32 / 255.0;
        let top = red(x0, y0) + (red(x1, y0) - red(x0, y0)) * tx;
        let bottom = red(x0, y1) + (red(x1, y1) - red(x0, y1)) * tx;
        top + (bottom - top) * ty
    }
}

/// File-picker filter: only `image/*` types are accepted.
#[inline]
pub fn accepts_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}
