use glam::{Mat4, Vec2, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// Clip space grows upward, pixel rows grow downward.
    pub fn clip_to_pixel(&self, clip: Vec2) -> Vec2 {
        let half = self.half_extent();
        Vec2::new((clip.x + 1.0) * half.x, (-clip.y + 1.0) * half.y)
    }

    pub fn pixel_to_clip(&self, pixel: Vec2) -> Vec2 {
        let half = self.half_extent().max(Vec2::splat(f32::EPSILON));
        Vec2::new(pixel.x / half.x - 1.0, 1.0 - pixel.y / half.y)
    }

    /// Converts a mouse drag in pixels into a clip-space translation.
    pub fn pixel_delta_to_clip(&self, delta: Vec2) -> Vec2 {
        let half = self.half_extent().max(Vec2::splat(f32::EPSILON));
        Vec2::new(delta.x / half.x, -delta.y / half.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for PixelPoint {
    fn from(point: Vec2) -> Self {
        Self {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
        }
    }
}

/// Horizontal crosshair line in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosshairSegment {
    pub start: PixelPoint,
    pub end: PixelPoint,
    /// One voxel row at the current zoom, at least 1.
    pub width: u32,
}

/// Places the crosshair for row `location` of a slice with `extent` rows.
pub fn recompute(location: usize, extent: usize, mvp: &Mat4, viewport: Viewport) -> CrosshairSegment {
    let span = extent.saturating_sub(1).max(1) as f32;
    let half = viewport.half_extent();

    let row_start = *mvp * Vec4::new(-1.0, -1.0, 0.0, 1.0);
    let row_end = *mvp * Vec4::new(-1.0, (1.0 / span) * 2.0 - 1.0, 0.0, 1.0);
    let delta = row_end - row_start;
    let pixel_delta = Vec2::new(delta.x * half.x, -delta.y * half.y);
    let width = (pixel_delta.length().floor() as u32).max(1);

    let y = (location as f32 / span) * 2.0 - 1.0;
    let start = *mvp * Vec4::new(-1.0, y, 0.0, 1.0);
    let end = *mvp * Vec4::new(1.0, y, 0.0, 1.0);

    CrosshairSegment {
        start: viewport.clip_to_pixel(start.truncate().truncate()).into(),
        end: viewport.clip_to_pixel(end.truncate().truncate()).into(),
        width,
    }
}
