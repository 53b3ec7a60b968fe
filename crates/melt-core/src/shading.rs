//! CPU model of the particle shader in `shaders/particles.wgsl`.
//!
//! Every function here is a pure mapping from uniforms and immutable
//! per-particle attributes to output; the WGSL mirrors it line for line.

use crate::constants::{
    DISPLACEMENT_AMPLITUDE, DISPLACEMENT_LATERAL, HEAT_EDGE_HIGH, HEAT_EDGE_LOW, POINT_SIZE_FACTOR,
};
use crate::particles::ParticleVertex;
use glam::{Mat4, Vec2, Vec3};

/// Hermite step, identical to the WGSL builtin.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Local displacement intensity from the heat-map red channel.
#[inline]
pub fn heat_intensity(heat_red: f32) -> f32 {
    smoothstep(HEAT_EDGE_LOW, HEAT_EDGE_HIGH, heat_red)
}

#[inline]
pub fn displacement_direction(angle: f32) -> Vec3 {
    Vec3::new(
        angle.cos() * DISPLACEMENT_LATERAL,
        angle.sin() * DISPLACEMENT_LATERAL,
        1.0,
    )
    .normalize()
}

/// Object-space position after displacement. With `strength == 0` this is
/// exactly the initial position.
pub fn displaced_position(vertex: &ParticleVertex, heat_red: f32, strength: f32) -> Vec3 {
    let initial = Vec3::from_array(vertex.initial_position);
    let amount = heat_intensity(heat_red) * DISPLACEMENT_AMPLITUDE * vertex.intensity;
    initial + displacement_direction(vertex.angle) * amount * strength
}

/// Point diameter in physical pixels, `view_z` being the (negative)
/// view-space depth of the particle.
#[inline]
pub fn point_size(picture_red: f32, resolution_y: f32, view_z: f32) -> f32 {
    POINT_SIZE_FACTOR * picture_red * resolution_y * (1.0 / -view_z)
}

/// Grayscale output colour.
#[inline]
pub fn point_color(picture_red: f32) -> f32 {
    picture_red * picture_red
}

/// Circular mask: `point_coord` in [0, 1]^2 across the sprite.
#[inline]
pub fn fragment_visible(point_coord: Vec2) -> bool {
    point_coord.distance(Vec2::splat(0.5)) <= 0.5
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedParticle {
    pub position: Vec3,
    pub view_z: f32,
    pub point_size: f32,
    pub color: f32,
}

/// Full vertex stage for one particle.
pub fn shade(
    vertex: &ParticleVertex,
    heat_red: f32,
    picture_red: f32,
    strength: f32,
    view: &Mat4,
    resolution: Vec2,
) -> ShadedParticle {
    let position = displaced_position(vertex, heat_red, strength);
    let view_z = view.transform_point3(position).z;
    ShadedParticle {
        position,
        view_z,
        point_size: point_size(picture_red, resolution.y, view_z),
        color: point_color(picture_red),
    }
}
