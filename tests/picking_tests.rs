use glam::{Vec2, Vec3, Vec4};
use melt_core::constants::PLANE_SIZE;
use melt_core::{
    screen_to_ndc, Camera, DisplacementStrength, PointerSample, Ray, ReferencePlane,
    ViewportState,
};

fn setup() -> (Camera, ReferencePlane, ViewportState) {
    let viewport = ViewportState::new(800.0, 600.0, 1.0);
    (
        Camera::new(viewport.aspect()),
        ReferencePlane::new(PLANE_SIZE),
        viewport,
    )
}

/// NDC of the plane's (+x, +y) corner as seen by `camera`.
fn projected_corner(camera: &Camera) -> Vec2 {
    let half = PLANE_SIZE * 0.5;
    let clip = camera.view_projection() * Vec4::new(half, half, 0.0, 1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn screen_to_ndc_maps_corners() {
    let vp = ViewportState::new(800.0, 600.0, 2.0);
    assert_eq!(screen_to_ndc(0.0, 0.0, &vp), Vec2::new(-1.0, 1.0));
    assert_eq!(screen_to_ndc(800.0, 600.0, &vp), Vec2::new(1.0, -1.0));
    assert_eq!(screen_to_ndc(400.0, 300.0, &vp), Vec2::ZERO);
}

#[test]
fn centre_pointer_hits_plane_centre() {
    let (camera, plane, vp) = setup();
    let pointer = PointerSample::from_screen(400.0, 300.0, &vp);
    let hit = plane.pick(&camera, &pointer).expect("centre should hit");
    assert!((hit.uv - Vec2::splat(0.5)).length() < 1e-4);
    assert!(hit.point.length() < 1e-3);
    let coord = hit.raster_coord(128.0, 128.0);
    assert!((coord - Vec2::splat(64.0)).length() < 1e-2);
}

#[test]
fn uv_v_axis_follows_raster_rows() {
    let (camera, plane, _) = setup();
    // Upper-left of the screen lands in the upper-left of the raster.
    let hit = plane
        .pick(&camera, &PointerSample { ndc: Vec2::new(-0.5, 0.7) })
        .expect("inside plane");
    assert!(hit.uv.x < 0.5);
    assert!(hit.uv.y < 0.5);
    assert!(hit.point.x < 0.0 && hit.point.y > 0.0);
}

#[test]
fn inside_hits_and_outside_misses() {
    let (camera, plane, _) = setup();
    let corner = projected_corner(&camera);
    let eps = 0.02;
    let steps = 24;
    for iy in 0..=steps {
        for ix in 0..=steps {
            let ndc = Vec2::new(
                -1.0 + 2.0 * ix as f32 / steps as f32,
                -1.0 + 2.0 * iy as f32 / steps as f32,
            );
            let hit = plane.pick(&camera, &PointerSample { ndc });
            let inside = ndc.x.abs() < corner.x - eps && ndc.y.abs() < corner.y - eps;
            let outside = ndc.x.abs() > corner.x + eps || ndc.y.abs() > corner.y + eps;
            if inside {
                let hit = hit.unwrap_or_else(|| panic!("expected hit at {ndc:?}"));
                assert!((0.0..=1.0).contains(&hit.uv.x));
                assert!((0.0..=1.0).contains(&hit.uv.y));
            } else if outside {
                assert!(hit.is_none(), "expected miss at {ndc:?}");
            }
        }
    }
}

#[test]
fn sentinel_pointer_always_misses() {
    let (camera, plane, _) = setup();
    let pointer = PointerSample::default();
    assert!(pointer.is_sentinel());
    assert!(plane.pick(&camera, &pointer).is_none());
}

#[test]
fn rays_parallel_or_away_from_plane_miss() {
    let plane = ReferencePlane::new(PLANE_SIZE);
    let parallel = Ray {
        origin: Vec3::new(0.0, 0.0, 1.0),
        direction: Vec3::X,
    };
    assert!(plane.intersect(&parallel).is_none());
    let away = Ray {
        origin: Vec3::new(0.0, 0.0, 18.0),
        direction: Vec3::Z,
    };
    assert!(plane.intersect(&away).is_none());
}

#[test]
fn plane_is_hit_from_behind() {
    let plane = ReferencePlane::new(PLANE_SIZE);
    let ray = Ray {
        origin: Vec3::new(1.0, -1.0, -18.0),
        direction: Vec3::Z,
    };
    let hit = plane.intersect(&ray).expect("back side hit");
    assert!((hit.uv - Vec2::new(0.6, 0.6)).length() < 1e-5);
}

#[test]
fn ray_from_camera_points_through_ndc() {
    let (camera, _, _) = setup();
    let ray = Ray::from_camera(&camera, Vec2::ZERO);
    assert_eq!(ray.origin, camera.eye);
    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn strength_boosts_to_ceiling_and_decays_linearly() {
    let mut s = DisplacementStrength::default();
    assert_eq!(s.value(), 0.0);
    s.apply(true);
    assert_eq!(s.value(), 0.8);
    let mut prev = s.value();
    for _ in 0..10 {
        s.apply(false);
        assert!((prev - s.value() - 0.01).abs() < 1e-5);
        prev = s.value();
    }
    // A hit jumps straight back regardless of the prior value
    s.apply(true);
    assert_eq!(s.value(), 0.8);
}

#[test]
fn strength_is_floored_at_zero() {
    let mut s = DisplacementStrength::new(0.8, 0.01);
    s.boost();
    for _ in 0..200 {
        let before = s.value();
        s.decay();
        assert!(s.value() <= before);
    }
    assert_eq!(s.value(), 0.0);
}
