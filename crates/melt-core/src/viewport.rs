use crate::constants::MAX_PIXEL_RATIO;
use glam::Vec2;

/// Output size in logical pixels plus the (clamped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl ViewportState {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Drawing-buffer resolution fed to the particle shader.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(
            self.width * self.pixel_ratio,
            self.height * self.pixel_ratio,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Surface size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let r = self.resolution();
        ((r.x.round() as u32).max(1), (r.y.round() as u32).max(1))
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
