// Host-side tests for constants and their relationships.
// The web crate is wasm-only, so its constants are included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use melt_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn strength_constants_are_consistent() {
    assert!(STRENGTH_CEILING > 0.0 && STRENGTH_CEILING <= 1.0);
    assert!(STRENGTH_DECAY_PER_FRAME > 0.0);
    assert!(STRENGTH_DECAY_PER_FRAME < STRENGTH_CEILING);
    // From the ceiling to zero in 80 frames
    let frames = (STRENGTH_CEILING / STRENGTH_DECAY_PER_FRAME).round() as u32;
    assert_eq!(frames, 80);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn background_never_displaces() {
    // The faded heat-map settles on the background; it must sit below the
    // smooth window or idle particles would drift.
    assert!(HEAT_EDGE_LOW < HEAT_EDGE_HIGH);
    assert!(BACKGROUND_RGB[0] < HEAT_EDGE_LOW);
    assert!(BACKGROUND_RGB.iter().all(|c| (*c - 24.0 / 255.0).abs() < 1e-6));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn grid_and_raster_sizes() {
    assert_eq!(GRID_SEGMENTS, 128);
    assert_eq!(HEATMAP_SIZE, 128);
    assert!(HEATMAP_SIZE.is_power_of_two());
    assert!(PLANE_SIZE > 0.0);
    assert!(HEATMAP_FADE_ALPHA > 0.0 && HEATMAP_FADE_ALPHA < 1.0);
    assert!(GLOW_SIZE_FRACTION > 0.0 && GLOW_SIZE_FRACTION < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sees_whole_plane() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    let half_visible = CAMERA_EYE.z * (CAMERA_FOV_Y_DEG.to_radians() * 0.5).tan();
    assert!(half_visible > PLANE_SIZE * 0.5);
    assert!(POINTER_SENTINEL > 1.0);
    assert_eq!(MAX_PIXEL_RATIO, 2.0);
}

#[test]
fn web_asset_paths_and_ids() {
    assert!(GLOW_URL.ends_with(".png"));
    assert!(PICTURE_URL.ends_with(".png"));
    assert!(!CANVAS_ID.is_empty());
    assert_ne!(CANVAS_ID, FILE_INPUT_ID);
    assert!(PLACEHOLDER_PICTURE_SIZE > 0);
}
