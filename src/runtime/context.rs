use glam::Vec2;

use crate::config::ViewerConfig;
use crate::history::{GestureFamily, PushOutcome, SessionId, UndoStack, Undoable};
use crate::model::{Axis, Extents, LocationUpdate, VolumePair};
use crate::slice::{DisplayMode, SliceError};
use crate::view::{Viewport, wheel_zoom_delta};

use super::display::{check_threshold, check_unit};
use super::{
    ColorMap, Command, DrawMode, PresentationSink, Result, RuntimeError, Scene, TraceKey,
    TracePoint, TraceStroke, TracingLayer, ValueChange, ViewId,
};

/// Entry point for the surrounding UI: every user intent becomes a command
/// pushed onto one undo history over one scene.
#[derive(Debug, Clone)]
pub struct Workspace {
    scene: Scene,
    history: UndoStack<Command>,
    pan_gestures: [GestureFamily; 2],
    stroke: Option<TraceStroke>,
    wheel_zoom_per_notch: f32,
    erase_radius: f32,
}

impl Workspace {
    pub fn new(config: &ViewerConfig) -> Self {
        let span = u32::from(config.pan_sessions).max(GestureFamily::MIN_SPAN);
        Self {
            scene: Scene::new(config),
            history: UndoStack::new(config.history_capacity),
            pan_gestures: [GestureFamily::new(0, span), GestureFamily::new(span, span)],
            stroke: None,
            wheel_zoom_per_notch: config.wheel_zoom_per_notch,
            erase_radius: config.erase_radius,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &UndoStack<Command> {
        &self.history
    }

    /// Binds a new pair. The cursor returns to the origin, both views reset
    /// and the history is cleared. An empty first slice is reported but the
    /// pair stays bound.
    pub fn bind_volumes(&mut self, volumes: VolumePair) -> Result<()> {
        let extents = volumes.extents();
        self.scene.bind_volumes(volumes);
        self.history.clear();
        self.stroke = None;
        for gesture in &mut self.pan_gestures {
            gesture.end();
        }
        log::info!(
            "bound volumes {}x{}x{}",
            extents.x,
            extents.y,
            extents.z
        );
        self.scene.refresh()?;
        Ok(())
    }

    pub fn resize(&mut self, view: ViewId, viewport: Viewport) {
        self.scene.resize(view, viewport);
    }

    fn submit(&mut self, command: Command) -> Option<PushOutcome> {
        if command.is_noop() {
            log::trace!("skipping no-op `{}`", command.label());
            return None;
        }
        Some(self.history.push(command, &mut self.scene))
    }

    /// Opens a drag on `view`; pans until `end_pan` merge into one entry.
    pub fn begin_pan(&mut self, view: ViewId) -> SessionId {
        self.pan_gestures[view.index()].begin()
    }

    /// `delta` is the mouse travel in window pixels.
    pub fn pan(&mut self, view: ViewId, delta: Vec2) -> Option<PushOutcome> {
        let clip = self.scene.view(view).viewport().pixel_delta_to_clip(delta);
        let session = self.pan_gestures[view.index()].session();
        self.submit(Command::pan(&self.scene, view, clip, session))
    }

    pub fn end_pan(&mut self, view: ViewId) {
        self.pan_gestures[view.index()].end();
    }

    pub fn zoom(&mut self, view: ViewId, delta: f32) -> Option<PushOutcome> {
        self.submit(Command::zoom(&self.scene, view, delta))
    }

    /// `angle_delta` in eighths of a degree, as wheel events report it.
    pub fn wheel(&mut self, view: ViewId, angle_delta: i32) -> Option<PushOutcome> {
        self.zoom(view, wheel_zoom_delta(angle_delta, self.wheel_zoom_per_notch))
    }

    pub fn reset_views(&mut self) -> Option<PushOutcome> {
        self.submit(Command::reset_view(&self.scene))
    }

    /// Out-of-range coordinates are skipped per axis.
    pub fn change_location(&mut self, update: LocationUpdate) -> Option<PushOutcome> {
        self.submit(Command::location(&self.scene, &update))
    }

    pub fn set_brightness(&mut self, value: f32) -> Result<Option<PushOutcome>> {
        let after = check_unit("brightness", value)?;
        let before = self.scene.display().brightness;
        Ok(self.submit(Command::Brightness(ValueChange::new(before, after))))
    }

    pub fn set_brightness_threshold(&mut self, value: f32) -> Result<Option<PushOutcome>> {
        let after = check_threshold(value)?;
        let before = self.scene.display().brightness_threshold;
        Ok(self.submit(Command::BrightnessThreshold(ValueChange::new(before, after))))
    }

    pub fn set_contrast(&mut self, value: f32) -> Result<Option<PushOutcome>> {
        let after = check_unit("contrast", value)?;
        let before = self.scene.display().contrast;
        Ok(self.submit(Command::Contrast(ValueChange::new(before, after))))
    }

    pub fn set_primary_opacity(&mut self, value: f32) -> Result<Option<PushOutcome>> {
        let after = check_unit("primary opacity", value)?;
        let before = self.scene.display().primary_opacity;
        Ok(self.submit(Command::PrimaryOpacity(ValueChange::new(before, after))))
    }

    pub fn set_secondary_opacity(&mut self, value: f32) -> Result<Option<PushOutcome>> {
        let after = check_unit("secondary opacity", value)?;
        let before = self.scene.display().secondary_opacity;
        Ok(self.submit(Command::SecondaryOpacity(ValueChange::new(before, after))))
    }

    pub fn set_primary_color_map(&mut self, map: ColorMap) -> Option<PushOutcome> {
        let before = self.scene.display().primary_color_map;
        self.submit(Command::PrimaryColorMap(ValueChange::new(before, map)))
    }

    pub fn set_secondary_color_map(&mut self, map: ColorMap) -> Option<PushOutcome> {
        let before = self.scene.display().secondary_color_map;
        self.submit(Command::SecondaryColorMap(ValueChange::new(before, map)))
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Option<PushOutcome> {
        let before = self.scene.display().display_mode;
        self.submit(Command::DisplayMode(ValueChange::new(before, mode)))
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) -> Option<PushOutcome> {
        let before = self.scene.display().draw_mode;
        self.submit(Command::DrawMode(ValueChange::new(before, mode)))
    }

    pub fn set_tracing_layer(&mut self, layer: TracingLayer) -> Option<PushOutcome> {
        let before = self.scene.display().tracing_layer;
        self.submit(Command::TracingLayer(ValueChange::new(before, layer)))
    }

    pub fn set_layer_visible(&mut self, layer: TracingLayer, visible: bool) -> Option<PushOutcome> {
        let before = self.scene.display().is_layer_visible(layer);
        self.submit(Command::TracingLayerVisible {
            layer,
            change: ValueChange::new(before, visible),
        })
    }

    /// Starts a freehand stroke on the axial view at a window pixel.
    pub fn begin_stroke(&mut self, pixel: Vec2) -> Result<()> {
        if !self.scene.is_loaded() {
            return Err(RuntimeError::NotLoaded);
        }
        self.stroke = Some(TraceStroke::new(pixel));
        Ok(())
    }

    pub fn extend_stroke(&mut self, pixel: Vec2) -> Result<()> {
        self.stroke
            .as_mut()
            .ok_or(RuntimeError::NoStroke)?
            .push(pixel);
        Ok(())
    }

    /// Ends the stroke: in point mode its voxels are added to the current
    /// layer and slice, in erase mode stored points near it are removed.
    pub fn finish_stroke(&mut self) -> Result<Option<PushOutcome>> {
        let stroke = self.stroke.take().ok_or(RuntimeError::NoStroke)?;
        let extents = self.scene.extents().ok_or(RuntimeError::NotLoaded)?;
        let points = self.stroke_voxels(stroke, &extents);
        let display = self.scene.display();
        let key = TraceKey {
            layer: display.tracing_layer,
            slice: self.scene.location().get(Axis::Z),
        };
        let command = match display.draw_mode {
            DrawMode::Points => Command::TraceAdd { key, points },
            DrawMode::Erase => {
                let traces = self.scene.traces();
                Command::TraceErase {
                    key,
                    before: traces.points(key).to_vec(),
                    after: traces.without_near(key, &points, self.erase_radius),
                }
            }
        };
        Ok(self.submit(command))
    }

    fn stroke_voxels(&self, stroke: TraceStroke, extents: &Extents) -> Vec<TracePoint> {
        let view = self.scene.view(ViewId::Axial);
        let mut points: Vec<TracePoint> = Vec::new();
        for pixel in stroke.into_points() {
            let Some(point) = view.window_to_voxel(pixel, extents) else {
                continue;
            };
            let inside = usize::try_from(point.x).is_ok_and(|x| x < extents.x)
                && usize::try_from(point.y).is_ok_and(|y| y < extents.y);
            if inside && points.last() != Some(&point) {
                points.push(point);
            }
        }
        points
    }

    /// Failures from re-derivations triggered by `change_location`,
    /// `set_display_mode`, `undo` or `redo` since the last call. The
    /// affected view keeps its last good frame.
    pub fn take_failures(&mut self) -> Vec<(ViewId, SliceError)> {
        self.scene.take_failures()
    }

    pub fn undo(&mut self) -> Option<&'static str> {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> Option<&'static str> {
        self.history.redo(&mut self.scene)
    }

    /// Hands every view's last good image and crosshair to `sink`.
    pub fn present<S: PresentationSink + ?Sized>(&self, sink: &mut S) {
        for id in ViewId::ALL {
            let view = self.scene.view(id);
            if let Some(image) = view.image() {
                sink.present_image(id, image, &view.composed());
            }
            if let Some(segment) = view.crosshair() {
                sink.present_crosshair(id, segment);
            }
        }
    }
}
