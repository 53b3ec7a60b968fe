use melt_core::constants::{GRID_SEGMENTS, PLANE_SIZE};
use melt_core::{ParticleField, ParticleVertex};
use std::f32::consts::TAU;

#[test]
fn vertex_layout_is_packed() {
    assert_eq!(std::mem::size_of::<ParticleVertex>(), 32);
}

#[test]
fn grid_has_one_particle_per_vertex() {
    let field = ParticleField::new(PLANE_SIZE, GRID_SEGMENTS, 1);
    assert_eq!(field.resolution(), 129);
    assert_eq!(field.len(), 129 * 129);
    assert!(!field.is_empty());
}

#[test]
fn layout_runs_left_to_right_top_to_bottom() {
    let field = ParticleField::new(10.0, 4, 3);
    let v = field.vertices();
    assert_eq!(v[0].initial_position, [-5.0, 5.0, 0.0]);
    assert_eq!(v[0].uv, [0.0, 1.0]);
    assert_eq!(v[1].initial_position, [-2.5, 5.0, 0.0]);
    assert_eq!(v[5].initial_position, [-5.0, 2.5, 0.0]);
    let last = v[v.len() - 1];
    assert_eq!(last.initial_position, [5.0, -5.0, 0.0]);
    assert_eq!(last.uv, [1.0, 0.0]);
}

#[test]
fn random_attributes_are_in_range() {
    let field = ParticleField::new(PLANE_SIZE, 32, 99);
    for v in field.vertices() {
        assert!((0.0..1.0).contains(&v.intensity));
        assert!((0.0..TAU).contains(&v.angle) || (v.angle - TAU).abs() < 1e-5);
        assert_eq!(v.initial_position[2], 0.0);
    }
}

#[test]
fn seed_determines_attributes() {
    let a = ParticleField::new(PLANE_SIZE, 16, 42);
    let b = ParticleField::new(PLANE_SIZE, 16, 42);
    let c = ParticleField::new(PLANE_SIZE, 16, 43);
    assert_eq!(a.vertices(), b.vertices());
    assert_ne!(a.vertices(), c.vertices());
}
