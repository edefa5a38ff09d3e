use glam::{Mat4, Vec2, Vec3};

use super::{PixelPoint, ViewState, ViewTransform, Viewport, recompute};

#[test]
fn midline_crosshair_with_identity_view() {
    let viewport = Viewport::new(800, 600);
    let segment = recompute(50, 100, &Mat4::IDENTITY, viewport);
    // row 50 of 0..=99 sits just above the midline; one row is 6 px tall
    assert_eq!(segment.width, 6);
    assert_eq!(segment.start, PixelPoint::new(0, 297));
    assert_eq!(segment.end, PixelPoint::new(800, 297));
    assert!((segment.start.y - 300).unsigned_abs() < segment.width);
}

#[test]
fn first_and_last_rows_hit_viewport_edges() {
    let viewport = Viewport::new(640, 480);
    let bottom = recompute(0, 64, &Mat4::IDENTITY, viewport);
    let top = recompute(63, 64, &Mat4::IDENTITY, viewport);
    assert_eq!(bottom.start.y, 480);
    assert_eq!(top.start.y, 0);
}

#[test]
fn zoom_widens_stroke_and_pan_shifts_endpoints() {
    let viewport = Viewport::new(800, 600);
    let mut transform = ViewTransform::new();
    transform.set_state(ViewState {
        translation: Vec3::new(0.5, 0.0, 0.0),
        scale: 2.0,
    });
    let segment = recompute(50, 100, &transform.compose(), viewport);
    assert_eq!(segment.width, 12);
    assert_eq!(segment.start.x, -200);
    assert_eq!(segment.end.x, 1400);
}

#[test]
fn stroke_width_never_drops_below_one() {
    let viewport = Viewport::new(100, 100);
    let mut transform = ViewTransform::new();
    transform.zoom(-0.99);
    let segment = recompute(10, 512, &transform.compose(), viewport);
    assert_eq!(segment.width, 1);
}

#[test]
fn single_row_extent_does_not_divide_by_zero() {
    let viewport = Viewport::new(100, 100);
    let segment = recompute(0, 1, &Mat4::IDENTITY, viewport);
    assert_eq!(segment.start.y, 100);
    assert_eq!(segment.width, 100);
}

#[test]
fn pixel_delta_maps_to_clip_translation() {
    let viewport = Viewport::new(400, 200);
    let clip = viewport.pixel_delta_to_clip(Vec2::new(100.0, 50.0));
    assert_eq!(clip, Vec2::new(0.5, -0.5));
    let pixel = viewport.clip_to_pixel(viewport.pixel_to_clip(Vec2::new(13.0, 170.0)));
    assert!((pixel - Vec2::new(13.0, 170.0)).length() < 1e-4);
}
