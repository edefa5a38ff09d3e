use glam::Mat4;

use crate::slice::NormalizedImage;
use crate::view::CrosshairSegment;

use super::ViewId;

/// Receives derived frames. The engine never draws; a renderer, a test
/// recorder or a report writer sits behind this trait.
pub trait PresentationSink {
    /// `mvp` maps slice-local coordinates in [-1, 1] to clip space.
    fn present_image(&mut self, view: ViewId, image: &NormalizedImage, mvp: &Mat4);

    fn present_crosshair(&mut self, view: ViewId, segment: &CrosshairSegment);
}
