use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::Viewport;

/// Wheel travel of one notch on most mice, in degrees.
pub const WHEEL_DEGREES_PER_NOTCH: f32 = 15.0;

/// Continuous pan/zoom state of one slice view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Only x and y are used.
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Pan/zoom state composed with fixed view and projection matrices.
///
/// Neither translation nor scale is clamped here; callers that want limits
/// apply them before handing deltas in.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    state: ViewState,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::with_matrices(Mat4::IDENTITY, Mat4::IDENTITY)
    }

    pub fn with_matrices(view_matrix: Mat4, projection_matrix: Mat4) -> Self {
        Self {
            state: ViewState::default(),
            view_matrix,
            projection_matrix,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
    }

    pub fn translation(&self) -> Vec3 {
        self.state.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.state.translation = translation;
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.state.scale = scale;
    }

    /// Translate, then scale uniformly.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.state.translation) * Mat4::from_scale(Vec3::splat(self.state.scale))
    }

    /// `model * view * projection`, mapping slice-local coordinates in
    /// [-1, 1] to clip space.
    pub fn compose(&self) -> Mat4 {
        self.model_matrix() * self.view_matrix * self.projection_matrix
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.state.translation += delta.extend(0.0);
    }

    pub fn zoom(&mut self, delta_scale: f32) {
        self.state.scale += delta_scale;
    }

    pub fn reset(&mut self) {
        self.state = ViewState::default();
    }

    /// Maps a window pixel back into slice-local coordinates. `None` when the
    /// composed transform is singular (for example a zero scale).
    pub fn window_to_model(&self, pixel: Vec2, viewport: Viewport) -> Option<Vec2> {
        let composed = self.compose();
        if composed.determinant().abs() <= f32::EPSILON {
            return None;
        }
        let clip = viewport.pixel_to_clip(pixel);
        let model = composed.inverse() * Vec4::new(clip.x, clip.y, 0.0, 1.0);
        model.is_finite().then(|| model.truncate().truncate())
    }
}

/// Scale change for a wheel event. `angle_delta` is in eighths of a degree;
/// every notch changes the scale by `per_notch`.
pub fn wheel_zoom_delta(angle_delta: i32, per_notch: f32) -> f32 {
    let degrees = angle_delta as f32 / 8.0;
    degrees * (per_notch / WHEEL_DEGREES_PER_NOTCH)
}
