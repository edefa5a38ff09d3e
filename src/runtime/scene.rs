use glam::Vec3;

use crate::config::ViewerConfig;
use crate::model::{ChangedAxes, Extents, Location4, LocationModel, LocationUpdate, VolumePair};
use crate::slice::{DisplayMode, RatioPolicy, SliceError};
use crate::view::{ViewState, Viewport};

use super::{DisplaySettings, SliceView, TraceStore, ViewId};

/// Registry of everything a command may touch. Commands name their targets
/// with `ViewId` handles that are resolved here.
#[derive(Debug, Clone)]
pub struct Scene {
    volumes: Option<VolumePair>,
    location: LocationModel,
    views: [SliceView; 2],
    display: DisplaySettings,
    traces: TraceStore,
    ratio_policy: RatioPolicy,
    failures: Vec<(ViewId, SliceError)>,
}

impl Scene {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            volumes: None,
            location: LocationModel::new(),
            views: [
                SliceView::new(ViewId::Axial, config.axial_viewport),
                SliceView::new(ViewId::Coronal, config.coronal_viewport),
            ],
            display: DisplaySettings::default(),
            traces: TraceStore::default(),
            ratio_policy: config.ratio_policy,
            failures: Vec::new(),
        }
    }

    /// Binds a new volume pair: cursor back to the origin, views reset,
    /// traces dropped.
    pub(crate) fn bind_volumes(&mut self, volumes: VolumePair) {
        self.location.bind(volumes.extents());
        self.volumes = Some(volumes);
        self.traces.clear();
        self.failures.clear();
        for view in &mut self.views {
            view.clear();
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.volumes.is_some()
    }

    pub fn volumes(&self) -> Option<&VolumePair> {
        self.volumes.as_ref()
    }

    pub fn extents(&self) -> Option<Extents> {
        self.location.extents()
    }

    pub fn location(&self) -> Location4 {
        self.location.location()
    }

    pub(crate) fn location_model(&self) -> &LocationModel {
        &self.location
    }

    pub fn view(&self, id: ViewId) -> &SliceView {
        &self.views[id.index()]
    }

    pub(crate) fn view_mut(&mut self, id: ViewId) -> &mut SliceView {
        &mut self.views[id.index()]
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub(crate) fn display_mut(&mut self) -> &mut DisplaySettings {
        &mut self.display
    }

    pub fn traces(&self) -> &TraceStore {
        &self.traces
    }

    pub(crate) fn traces_mut(&mut self) -> &mut TraceStore {
        &mut self.traces
    }

    pub fn ratio_policy(&self) -> RatioPolicy {
        self.ratio_policy
    }

    /// Moves the cursor and refreshes whatever depends on the axes that
    /// changed: a view's image on its depth axis, its crosshair on its
    /// crosshair axis.
    pub fn apply_location(&mut self, update: &LocationUpdate) -> ChangedAxes {
        let changed = self.location.set_location(update);
        for id in ViewId::ALL {
            if changed.contains(id.crosshair_axis()) {
                self.refresh_crosshair(id);
            }
            if changed.contains(id.depth_axis()) {
                self.rederive(id);
            }
        }
        changed
    }

    pub(crate) fn resize(&mut self, id: ViewId, viewport: Viewport) {
        self.view_mut(id).set_viewport(viewport);
        self.refresh_crosshair(id);
    }

    pub(crate) fn set_translation(&mut self, id: ViewId, translation: Vec3) {
        self.view_mut(id).transform_mut().set_translation(translation);
        self.refresh_crosshair(id);
    }

    pub(crate) fn set_scale(&mut self, id: ViewId, scale: f32) {
        self.view_mut(id).transform_mut().set_scale(scale);
        self.refresh_crosshair(id);
    }

    /// Resets both views in one step.
    pub(crate) fn reset_views(&mut self) {
        self.restore_views(ViewState::default(), ViewState::default());
    }

    pub(crate) fn restore_views(&mut self, axial: ViewState, coronal: ViewState) {
        self.view_mut(ViewId::Axial).transform_mut().set_state(axial);
        self.view_mut(ViewId::Coronal).transform_mut().set_state(coronal);
        self.refresh_crosshair(ViewId::Axial);
        self.refresh_crosshair(ViewId::Coronal);
    }

    pub(crate) fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display.display_mode = mode;
        for id in ViewId::ALL {
            self.rederive(id);
        }
    }

    /// Re-derives both images and crosshairs, reporting the first failure.
    pub fn refresh(&mut self) -> Result<(), SliceError> {
        let mut first_failure = None;
        for id in ViewId::ALL {
            self.refresh_crosshair(id);
            if let Err(error) = self.refresh_image(id) {
                first_failure.get_or_insert(error);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    /// Drains failures queued by re-derivations that had no caller to
    /// report to (location changes and display mode switches, including
    /// their undo and redo).
    pub(crate) fn take_failures(&mut self) -> Vec<(ViewId, SliceError)> {
        std::mem::take(&mut self.failures)
    }

    fn rederive(&mut self, id: ViewId) {
        if let Err(error) = self.refresh_image(id) {
            self.failures.push((id, error));
        }
    }

    fn refresh_crosshair(&mut self, id: ViewId) {
        let Some(extents) = self.location.extents() else {
            return;
        };
        let location = self.location.location();
        self.views[id.index()].refresh_crosshair(location, &extents);
    }

    fn refresh_image(&mut self, id: ViewId) -> Result<(), SliceError> {
        let Some(volumes) = self.volumes.as_ref() else {
            return Ok(());
        };
        let location = self.location.location();
        self.views[id.index()].refresh_image(
            volumes,
            self.display.display_mode,
            location,
            self.ratio_policy,
        )
    }
}
