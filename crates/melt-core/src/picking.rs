//! Pointer-to-plane picking and the displacement strength it drives.

use crate::camera::Camera;
use crate::constants::{POINTER_SENTINEL, STRENGTH_CEILING, STRENGTH_DECAY_PER_FRAME};
use crate::viewport::ViewportState;
use glam::{Vec2, Vec3, Vec4};

/// Last pointer position in normalized device coordinates.
///
/// Starts at a sentinel far outside [-1, 1] so the first picks miss and the
/// glow is painted off-buffer until the pointer actually moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub ndc: Vec2,
}

impl Default for PointerSample {
    fn default() -> Self {
        Self {
            ndc: Vec2::splat(POINTER_SENTINEL),
        }
    }
}

impl PointerSample {
    pub fn from_screen(x: f32, y: f32, viewport: &ViewportState) -> Self {
        Self {
            ndc: screen_to_ndc(x, y, viewport),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.ndc == Vec2::splat(POINTER_SENTINEL)
    }
}

/// Logical-pixel position (origin top-left) to NDC (y up).
#[inline]
pub fn screen_to_ndc(x: f32, y: f32, viewport: &ViewportState) -> Vec2 {
    Vec2::new(
        (x / viewport.width) * 2.0 - 1.0,
        -(y / viewport.height) * 2.0 + 1.0,
    )
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera eye through `ndc` on the image plane.
    pub fn from_camera(camera: &Camera, ndc: Vec2) -> Self {
        let inv = camera.view_projection().inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let through: Vec3 = p.truncate() / p.w;
        Self {
            origin: camera.eye,
            direction: (through - camera.eye).normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray met the reference plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// Texture coordinate in raster order: u left-to-right, v top-to-bottom.
    pub uv: Vec2,
    pub point: Vec3,
}

impl PickHit {
    /// Pixel position of the hit on a `width` x `height` raster.
    pub fn raster_coord(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.uv.x * width, self.uv.y * height)
    }
}

/// Invisible square at the origin in the z = 0 plane, coplanar with the
/// particle grid. Hit from either side.
#[derive(Clone, Copy, Debug)]
pub struct ReferencePlane {
    pub size: f32,
}

impl ReferencePlane {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<PickHit> {
        if ray.direction.z.abs() < 1e-6 {
            return None;
        }
        let t = -ray.origin.z / ray.direction.z;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        let point = ray.at(t);
        let half = self.size * 0.5;
        if point.x.abs() > half || point.y.abs() > half {
            return None;
        }
        let u = (point.x + half) / self.size;
        let v = (point.y + half) / self.size;
        Some(PickHit {
            uv: Vec2::new(u, 1.0 - v),
            point,
        })
    }

    pub fn pick(&self, camera: &Camera, pointer: &PointerSample) -> Option<PickHit> {
        if pointer.is_sentinel() {
            return None;
        }
        self.intersect(&Ray::from_camera(camera, pointer.ndc))
    }
}

/// Master blend between the flat picture (0) and the fully displaced one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementStrength {
    value: f32,
    ceiling: f32,
    decay: f32,
}

impl Default for DisplacementStrength {
    fn default() -> Self {
        Self::new(STRENGTH_CEILING, STRENGTH_DECAY_PER_FRAME)
    }
}

impl DisplacementStrength {
    pub fn new(ceiling: f32, decay: f32) -> Self {
        Self {
            value: 0.0,
            ceiling,
            decay,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn boost(&mut self) {
        self.value = self.ceiling;
    }

    pub fn decay(&mut self) {
        self.value = (self.value - self.decay).max(0.0);
    }

    /// One boost-or-decay decision.
    pub fn apply(&mut self, hit: bool) {
        if hit {
            self.boost();
        } else {
            self.decay();
        }
    }
}
