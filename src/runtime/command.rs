use glam::{Vec2, Vec3};

use crate::history::{SessionId, Undoable};
use crate::model::{Location4, LocationUpdate};
use crate::slice::DisplayMode;
use crate::view::ViewState;

use super::{ColorMap, DrawMode, Scene, TraceKey, TracePoint, TracingLayer, ViewId};

/// Value before and after a change. Undo restores `before` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange<T> {
    pub before: T,
    pub after: T,
}

impl<T: Copy + PartialEq> ValueChange<T> {
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }

    fn pick(&self, forward: bool) -> T {
        if forward { self.after } else { self.before }
    }

    fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Consecutive commands with equal tags collapse into one history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeTag {
    Pan { view: ViewId, session: SessionId },
    Zoom(ViewId),
    ResetView,
    Location,
    Brightness,
    BrightnessThreshold,
    Contrast,
    PrimaryOpacity,
    SecondaryOpacity,
    PrimaryColorMap,
    SecondaryColorMap,
    DisplayMode,
    DrawMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `session` is `None` for a pan made outside a drag; such pans never merge.
    Pan {
        view: ViewId,
        session: Option<SessionId>,
        change: ValueChange<Vec3>,
    },
    Zoom {
        view: ViewId,
        change: ValueChange<f32>,
    },
    /// Resets both views; keeps both prior states.
    ResetView {
        axial: ViewState,
        coronal: ViewState,
    },
    Location(ValueChange<Location4>),
    Brightness(ValueChange<f32>),
    BrightnessThreshold(ValueChange<f32>),
    Contrast(ValueChange<f32>),
    PrimaryOpacity(ValueChange<f32>),
    SecondaryOpacity(ValueChange<f32>),
    PrimaryColorMap(ValueChange<ColorMap>),
    SecondaryColorMap(ValueChange<ColorMap>),
    DisplayMode(ValueChange<DisplayMode>),
    DrawMode(ValueChange<DrawMode>),
    TracingLayer(ValueChange<TracingLayer>),
    TracingLayerVisible {
        layer: TracingLayer,
        change: ValueChange<bool>,
    },
    TraceAdd {
        key: TraceKey,
        points: Vec<TracePoint>,
    },
    /// Keeps the whole point list of the slice so undo restores its order.
    TraceErase {
        key: TraceKey,
        before: Vec<TracePoint>,
        after: Vec<TracePoint>,
    },
}

impl Command {
    pub fn pan(scene: &Scene, view: ViewId, delta: Vec2, session: Option<SessionId>) -> Self {
        let before = scene.view(view).transform().translation();
        Self::Pan {
            view,
            session,
            change: ValueChange::new(before, before + delta.extend(0.0)),
        }
    }

    pub fn zoom(scene: &Scene, view: ViewId, delta: f32) -> Self {
        let before = scene.view(view).transform().scale();
        Self::Zoom {
            view,
            change: ValueChange::new(before, before + delta),
        }
    }

    pub fn reset_view(scene: &Scene) -> Self {
        Self::ResetView {
            axial: scene.view(ViewId::Axial).view_state(),
            coronal: scene.view(ViewId::Coronal).view_state(),
        }
    }

    /// Snapshots the full cursor so undo restores every axis, even the ones
    /// the update left alone.
    pub fn location(scene: &Scene, update: &LocationUpdate) -> Self {
        let model = scene.location_model();
        Self::Location(ValueChange::new(model.location(), model.resolve(update)))
    }

    /// True when applying the command would leave the scene unchanged.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Pan { change, .. } => change.is_noop(),
            Self::Zoom { change, .. } => change.is_noop(),
            Self::ResetView { axial, coronal } => {
                *axial == ViewState::default() && *coronal == ViewState::default()
            }
            Self::Location(change) => change.is_noop(),
            Self::Brightness(change)
            | Self::BrightnessThreshold(change)
            | Self::Contrast(change)
            | Self::PrimaryOpacity(change)
            | Self::SecondaryOpacity(change) => change.is_noop(),
            Self::PrimaryColorMap(change) | Self::SecondaryColorMap(change) => change.is_noop(),
            Self::DisplayMode(change) => change.is_noop(),
            Self::DrawMode(change) => change.is_noop(),
            Self::TracingLayer(change) => change.is_noop(),
            Self::TracingLayerVisible { change, .. } => change.is_noop(),
            Self::TraceAdd { points, .. } => points.is_empty(),
            Self::TraceErase { before, after, .. } => before == after,
        }
    }

    fn write(&self, scene: &mut Scene, forward: bool) {
        match self {
            Self::Pan { view, change, .. } => scene.set_translation(*view, change.pick(forward)),
            Self::Zoom { view, change } => scene.set_scale(*view, change.pick(forward)),
            Self::ResetView { axial, coronal } => {
                if forward {
                    scene.reset_views();
                } else {
                    scene.restore_views(*axial, *coronal);
                }
            }
            Self::Location(change) => {
                scene.apply_location(&LocationUpdate::all(change.pick(forward)));
            }
            Self::Brightness(change) => scene.display_mut().brightness = change.pick(forward),
            Self::BrightnessThreshold(change) => {
                scene.display_mut().brightness_threshold = change.pick(forward)
            }
            Self::Contrast(change) => scene.display_mut().contrast = change.pick(forward),
            Self::PrimaryOpacity(change) => {
                scene.display_mut().primary_opacity = change.pick(forward)
            }
            Self::SecondaryOpacity(change) => {
                scene.display_mut().secondary_opacity = change.pick(forward)
            }
            Self::PrimaryColorMap(change) => {
                scene.display_mut().primary_color_map = change.pick(forward)
            }
            Self::SecondaryColorMap(change) => {
                scene.display_mut().secondary_color_map = change.pick(forward)
            }
            Self::DisplayMode(change) => scene.set_display_mode(change.pick(forward)),
            Self::DrawMode(change) => scene.display_mut().draw_mode = change.pick(forward),
            Self::TracingLayer(change) => scene.display_mut().tracing_layer = change.pick(forward),
            Self::TracingLayerVisible { layer, change } => scene
                .display_mut()
                .set_layer_visible(*layer, change.pick(forward)),
            Self::TraceAdd { key, points } => {
                if forward {
                    scene.traces_mut().add(*key, points);
                } else {
                    scene.traces_mut().remove(*key, points);
                }
            }
            Self::TraceErase { key, before, after } => {
                let points = if forward { after } else { before };
                scene.traces_mut().replace(*key, points.clone());
            }
        }
    }
}

impl Undoable for Command {
    type Target = Scene;
    type Tag = MergeTag;

    fn apply(&self, scene: &mut Scene) {
        self.write(scene, true);
    }

    fn revert(&self, scene: &mut Scene) {
        self.write(scene, false);
    }

    fn merge_tag(&self) -> Option<MergeTag> {
        let tag = match self {
            Self::Pan { view, session, .. } => MergeTag::Pan {
                view: *view,
                session: (*session)?,
            },
            Self::Zoom { view, .. } => MergeTag::Zoom(*view),
            Self::ResetView { .. } => MergeTag::ResetView,
            Self::Location(_) => MergeTag::Location,
            Self::Brightness(_) => MergeTag::Brightness,
            Self::BrightnessThreshold(_) => MergeTag::BrightnessThreshold,
            Self::Contrast(_) => MergeTag::Contrast,
            Self::PrimaryOpacity(_) => MergeTag::PrimaryOpacity,
            Self::SecondaryOpacity(_) => MergeTag::SecondaryOpacity,
            Self::PrimaryColorMap(_) => MergeTag::PrimaryColorMap,
            Self::SecondaryColorMap(_) => MergeTag::SecondaryColorMap,
            Self::DisplayMode(_) => MergeTag::DisplayMode,
            Self::DrawMode(_) => MergeTag::DrawMode,
            Self::TracingLayer(_)
            | Self::TracingLayerVisible { .. }
            | Self::TraceAdd { .. } | Self::TraceErase { .. } => {
                return None;
            }
        };
        Some(tag)
    }

    /// Keeps this entry's `before` and takes the newer `after`.
    fn merge(&mut self, next: &Self) -> bool {
        if std::mem::discriminant(self) != std::mem::discriminant(next) {
            return false;
        }
        match (self, next) {
            (Self::Pan { change, .. }, Self::Pan { change: next, .. }) => change.after = next.after,
            (
                Self::Zoom { change, .. }
                | Self::Brightness(change)
                | Self::BrightnessThreshold(change)
                | Self::Contrast(change)
                | Self::PrimaryOpacity(change)
                | Self::SecondaryOpacity(change),
                Self::Zoom { change: next, .. }
                | Self::Brightness(next)
                | Self::BrightnessThreshold(next)
                | Self::Contrast(next)
                | Self::PrimaryOpacity(next)
                | Self::SecondaryOpacity(next),
            ) => change.after = next.after,
            // the older entry already holds the pre-reset states
            (Self::ResetView { .. }, Self::ResetView { .. }) => {}
            (Self::Location(change), Self::Location(next)) => change.after = next.after,
            (
                Self::PrimaryColorMap(change) | Self::SecondaryColorMap(change),
                Self::PrimaryColorMap(next) | Self::SecondaryColorMap(next),
            ) => change.after = next.after,
            (Self::DisplayMode(change), Self::DisplayMode(next)) => change.after = next.after,
            (Self::DrawMode(change), Self::DrawMode(next)) => change.after = next.after,
            _ => return false,
        }
        true
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pan { .. } => "move view",
            Self::Zoom { .. } => "zoom view",
            Self::ResetView { .. } => "reset views",
            Self::Location(_) => "change location",
            Self::Brightness(_) => "change brightness",
            Self::BrightnessThreshold(_) => "change brightness threshold",
            Self::Contrast(_) => "change contrast",
            Self::PrimaryOpacity(_) => "change primary opacity",
            Self::SecondaryOpacity(_) => "change secondary opacity",
            Self::PrimaryColorMap(_) => "change primary color map",
            Self::SecondaryColorMap(_) => "change secondary color map",
            Self::DisplayMode(_) => "change display mode",
            Self::DrawMode(_) => "change draw mode",
            Self::TracingLayer(_) => "change tracing layer",
            Self::TracingLayerVisible { .. } => "toggle layer visibility",
            Self::TraceAdd { .. } => "add trace points",
            Self::TraceErase { .. } => "erase trace points",
        }
    }
}
