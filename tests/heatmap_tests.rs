use glam::Vec2;
use image::{ImageFormat, Rgba, RgbaImage};
use melt_core::constants::{BACKGROUND_RGB, HEATMAP_FADE_ALPHA, POINTER_SENTINEL};
use melt_core::{GlowSprite, HeatMap, MeltError};
use std::io::Cursor;

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

fn all_pixels(map: &HeatMap) -> Vec<[f32; 3]> {
    let mut v = Vec::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            v.push(map.pixel(x, y));
        }
    }
    v
}

#[test]
fn starts_filled_with_background() {
    let map = HeatMap::new(128);
    assert_eq!((map.width(), map.height()), (128, 128));
    assert!(all_pixels(&map).iter().all(|p| *p == BACKGROUND_RGB));
    let bytes = map.to_rgba8();
    assert_eq!(bytes.len(), 128 * 128 * 4);
    assert_eq!(&bytes[..4], &[24, 24, 24, 255]);
}

#[test]
fn glow_brightens_centre() {
    let mut map = HeatMap::new(128);
    map.draw_glow(&GlowSprite::default(), Vec2::splat(64.0), 32.0);
    assert!(map.pixel(64, 64)[0] > 0.8);
    // Outside the sprite square nothing changes
    assert_eq!(map.pixel(10, 10), BACKGROUND_RGB);
    assert!(map.sample_red(Vec2::splat(0.5)) > 0.8);
}

#[test]
fn glow_never_darkens() {
    let mut map = HeatMap::new(64);
    let sprite = GlowSprite::default();
    map.draw_glow(&sprite, Vec2::new(20.0, 30.0), 24.0);
    for _ in 0..3 {
        map.fade(HEATMAP_FADE_ALPHA);
    }
    let before = all_pixels(&map);
    map.draw_glow(&sprite, Vec2::new(28.0, 30.0), 24.0);
    let after = all_pixels(&map);
    for (b, a) in before.iter().zip(&after) {
        for c in 0..3 {
            assert!(a[c] >= b[c] - 1e-6);
        }
    }
}

#[test]
fn fade_converges_monotonically_to_background() {
    let mut map = HeatMap::new(128);
    map.draw_glow(&GlowSprite::default(), Vec2::splat(64.0), 32.0);
    let mut prev = map.pixel(64, 64)[0];
    for _ in 0..120 {
        map.fade(HEATMAP_FADE_ALPHA);
        let now = map.pixel(64, 64)[0];
        assert!(now < prev || (now - BACKGROUND_RGB[0]).abs() < 1e-6);
        assert!(now >= BACKGROUND_RGB[0] - 1e-6);
        prev = now;
    }
    assert!((prev - BACKGROUND_RGB[0]).abs() < 1e-3);
}

#[test]
fn glow_at_sentinel_paints_nothing() {
    let mut map = HeatMap::new(128);
    map.draw_glow(
        &GlowSprite::default(),
        Vec2::splat(POINTER_SENTINEL),
        32.0,
    );
    assert!(all_pixels(&map).iter().all(|p| *p == BACKGROUND_RGB));
}

#[test]
fn dirty_flag_tracks_changes() {
    let mut map = HeatMap::new(16);
    assert!(map.take_dirty());
    assert!(!map.is_dirty());
    map.fade(0.1);
    assert!(map.take_dirty());
    map.draw_glow(&GlowSprite::default(), Vec2::splat(8.0), 4.0);
    assert!(map.is_dirty());
}

#[test]
fn glow_sprite_from_png() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
    let sprite = GlowSprite::from_image_bytes(&png_bytes(&img)).expect("decode");
    assert_eq!(sprite.dimensions(), (8, 8));

    let mut map = HeatMap::new(32);
    map.draw_glow(&sprite, Vec2::splat(16.0), 8.0);
    let p = map.pixel(16, 16);
    assert!((p[0] - 1.0).abs() < 1e-5);
    assert!((p[1] - BACKGROUND_RGB[1]).abs() < 1e-5);
}

#[test]
fn glow_sprite_rejects_bad_bytes() {
    assert!(matches!(
        GlowSprite::from_image_bytes(&[]),
        Err(MeltError::EmptyImage)
    ));
    assert!(matches!(
        GlowSprite::from_image_bytes(b"not an image"),
        Err(MeltError::ImageDecode(_))
    ));
}
