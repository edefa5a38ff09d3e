use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use crate::model::{Axis, Channel, Extents, Location4, VolumePair};
use crate::slice::{DisplayMode, NormalizedImage, RatioPolicy, SliceError, derive_slice};
use crate::view::{CrosshairSegment, ViewState, ViewTransform, Viewport, recompute};

use super::TracePoint;

/// Handle naming one of the two slice views owned by a `Scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Axial,
    Coronal,
}

impl ViewId {
    pub const ALL: [ViewId; 2] = [ViewId::Axial, ViewId::Coronal];

    pub fn index(self) -> usize {
        match self {
            Self::Axial => 0,
            Self::Coronal => 1,
        }
    }

    /// Axis the view slices through.
    pub fn depth_axis(self) -> Axis {
        match self {
            Self::Axial => Axis::Z,
            Self::Coronal => Axis::Y,
        }
    }

    /// Axis the horizontal crosshair tracks.
    pub fn crosshair_axis(self) -> Axis {
        match self {
            Self::Axial => Axis::Y,
            Self::Coronal => Axis::Z,
        }
    }

    fn along_depth_axis(self) -> bool {
        matches!(self, Self::Axial)
    }
}

fn axis_extent(extents: &Extents, axis: Axis) -> usize {
    extents.limit(axis).unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct SliceView {
    id: ViewId,
    transform: ViewTransform,
    viewport: Viewport,
    crosshair: Option<CrosshairSegment>,
    image: Option<NormalizedImage>,
    last_failure: Option<SliceError>,
}

impl SliceView {
    pub fn new(id: ViewId, viewport: Viewport) -> Self {
        Self {
            id,
            transform: ViewTransform::new(),
            viewport,
            crosshair: None,
            image: None,
            last_failure: None,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn view_state(&self) -> ViewState {
        self.transform.state()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn crosshair(&self) -> Option<&CrosshairSegment> {
        self.crosshair.as_ref()
    }

    /// Last successfully derived image.
    pub fn image(&self) -> Option<&NormalizedImage> {
        self.image.as_ref()
    }

    /// Failure of the most recent derivation, cleared by the next success.
    pub fn last_failure(&self) -> Option<&SliceError> {
        self.last_failure.as_ref()
    }

    pub fn composed(&self) -> Mat4 {
        self.transform.compose()
    }

    pub(crate) fn transform_mut(&mut self) -> &mut ViewTransform {
        &mut self.transform
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub(crate) fn clear(&mut self) {
        self.transform.reset();
        self.crosshair = None;
        self.image = None;
        self.last_failure = None;
    }

    pub(crate) fn refresh_crosshair(&mut self, location: Location4, extents: &Extents) {
        let axis = self.id.crosshair_axis();
        let extent = axis_extent(extents, axis);
        self.crosshair = Some(recompute(
            location.get(axis),
            extent,
            &self.transform.compose(),
            self.viewport,
        ));
    }

    /// Re-derives the image. On failure the previous image stays in place.
    pub(crate) fn refresh_image(
        &mut self,
        volumes: &VolumePair,
        mode: DisplayMode,
        location: Location4,
        policy: RatioPolicy,
    ) -> Result<(), SliceError> {
        let depth = location.get(self.id.depth_axis());
        let (a, b) = (volumes.channel(Channel::A), volumes.channel(Channel::B));
        match derive_slice(a, b, mode, depth, self.id.along_depth_axis(), policy) {
            Ok(image) => {
                self.image = Some(image);
                self.last_failure = None;
                Ok(())
            }
            Err(error) => {
                log::warn!("{:?} view keeps its last frame: {error}", self.id);
                self.last_failure = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Converts a window pixel into slice voxel coordinates.
    pub fn window_to_voxel(&self, pixel: Vec2, extents: &Extents) -> Option<TracePoint> {
        let model = self.transform.window_to_model(pixel, self.viewport)?;
        let columns = axis_extent(extents, Axis::X).saturating_sub(1) as f32;
        let rows = axis_extent(extents, self.id.crosshair_axis()).saturating_sub(1) as f32;
        let column = (model.x + 1.0) * 0.5 * columns;
        let row = (model.y + 1.0) * 0.5 * rows;
        Some(TracePoint::new(column.round() as i32, row.round() as i32))
    }
}
