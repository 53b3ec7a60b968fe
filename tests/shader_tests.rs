use melt_core::{ParticleUniforms, OVERLAY_WGSL, PARTICLES_WGSL};

#[test]
fn particle_shader_entry_points() {
    assert!(PARTICLES_WGSL.contains("fn vs_particle"));
    assert!(PARTICLES_WGSL.contains("fn fs_particle"));
    assert!(PARTICLES_WGSL.contains("discard"));
    assert!(PARTICLES_WGSL.contains("smoothstep(0.1, 0.3"));
}

#[test]
fn overlay_shader_entry_points() {
    assert!(OVERLAY_WGSL.contains("fn vs_fullscreen"));
    assert!(OVERLAY_WGSL.contains("fn fs_overlay"));
}

#[test]
fn uniform_block_matches_wgsl_layout() {
    // two mat4x4 + vec2 + f32 + padding, 16-byte aligned
    assert_eq!(std::mem::size_of::<ParticleUniforms>(), 144);
    assert_eq!(std::mem::size_of::<ParticleUniforms>() % 16, 0);
}

#[test]
fn overlay_sits_in_top_right_corner() {
    let (x, y, w, h) = melt_core::render::overlay_rect(1000, 800);
    assert_eq!(w, h);
    assert!(x + w <= 1000.0);
    assert!(x > 500.0);
    assert!(y < 100.0);

    let (x, y, w, h) = melt_core::render::overlay_rect(1, 1);
    assert!(x >= 0.0 && y >= 0.0 && w >= 1.0 && h >= 1.0);
}

#[test]
fn srgb_background_to_linear() {
    let lin = melt_core::render::srgb_to_linear(24.0 / 255.0);
    assert!(lin > 0.008 && lin < 0.01);
    assert_eq!(melt_core::render::srgb_to_linear(0.0), 0.0);
    assert!((melt_core::render::srgb_to_linear(1.0) - 1.0).abs() < 1e-9);
}
