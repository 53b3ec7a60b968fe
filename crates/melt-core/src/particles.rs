//! Immutable particle grid built once per session.
//!
//! Particles sit on the vertices of a segmented square in the z = 0 plane,
//! row by row from the top edge. Each carries a random intensity and angle
//! fixed at creation; nothing about a particle ever changes afterwards.

use rand::prelude::*;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub initial_position: [f32; 3],
    pub intensity: f32,
    pub uv: [f32; 2],
    pub angle: f32,
    pub _pad: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    size: f32,
    segments: u32,
    vertices: Vec<ParticleVertex>,
}

impl ParticleField {
    pub fn new(size: f32, segments: u32, seed: u64) -> Self {
        let segments = segments.max(1);
        let per_side = segments + 1;
        let mut rng = StdRng::seed_from_u64(seed);
        let half = size * 0.5;
        let step = size / segments as f32;
        let mut vertices = Vec::with_capacity((per_side * per_side) as usize);
        for iy in 0..per_side {
            let y = half - iy as f32 * step;
            for ix in 0..per_side {
                let x = ix as f32 * step - half;
                vertices.push(ParticleVertex {
                    initial_position: [x, y, 0.0],
                    intensity: rng.gen::<f32>(),
                    uv: [
                        ix as f32 / segments as f32,
                        1.0 - iy as f32 / segments as f32,
                    ],
                    angle: rng.gen::<f32>() * TAU,
                    _pad: 0.0,
                });
            }
        }
        Self {
            size,
            segments,
            vertices,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Particles per side of the grid.
    pub fn resolution(&self) -> u32 {
        self.segments + 1
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }
}
