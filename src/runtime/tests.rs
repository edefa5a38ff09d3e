use glam::{Mat4, Vec2, Vec3};

use super::{
    ColorMap, DisplaySettings, DrawMode, PresentationSink, RuntimeError, SliceView, TraceKey,
    TracePoint, TraceStore, TraceStroke, TracingLayer, ViewId, Workspace,
};
use crate::config::ViewerConfig;
use crate::history::PushOutcome;
use crate::model::{Axis, Extents, Location4, LocationUpdate, phantom};
use crate::slice::{DisplayMode, NormalizedImage, RatioPolicy, SliceError};
use crate::view::{CrosshairSegment, ViewState, Viewport};

fn loaded_workspace() -> Workspace {
    workspace_with(&ViewerConfig::default())
}

fn workspace_with(config: &ViewerConfig) -> Workspace {
    let mut workspace = Workspace::new(config);
    let pair = phantom(Extents::new(16, 12, 8)).expect("phantom");
    workspace.bind_volumes(pair).expect("bind");
    workspace
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    location: Location4,
    views: Vec<(ViewState, Option<CrosshairSegment>, Option<NormalizedImage>)>,
    display: DisplaySettings,
    traces: TraceStore,
}

fn snapshot(workspace: &Workspace) -> Snapshot {
    let scene = workspace.scene();
    Snapshot {
        location: scene.location(),
        views: ViewId::ALL
            .into_iter()
            .map(|id| {
                let view = scene.view(id);
                (
                    view.view_state(),
                    view.crosshair().copied(),
                    view.image().cloned(),
                )
            })
            .collect(),
        display: scene.display().clone(),
        traces: scene.traces().clone(),
    }
}

#[derive(Default)]
struct Recorder {
    images: Vec<(ViewId, usize, usize, Mat4)>,
    crosshairs: Vec<(ViewId, CrosshairSegment)>,
}

impl PresentationSink for Recorder {
    fn present_image(&mut self, view: ViewId, image: &NormalizedImage, mvp: &Mat4) {
        self.images.push((view, image.width(), image.height(), *mvp));
    }

    fn present_crosshair(&mut self, view: ViewId, segment: &CrosshairSegment) {
        self.crosshairs.push((view, *segment));
    }
}

#[test]
fn binding_resets_cursor_and_derives_both_views() {
    let workspace = loaded_workspace();
    let scene = workspace.scene();
    assert_eq!(scene.location(), Location4::default());
    assert!(workspace.history().is_empty());

    let axial = scene.view(ViewId::Axial).image().expect("axial image");
    assert_eq!((axial.width(), axial.height()), (16, 12));
    let coronal = scene.view(ViewId::Coronal).image().expect("coronal image");
    assert_eq!((coronal.width(), coronal.height()), (16, 8));
    assert!(scene.view(ViewId::Axial).crosshair().is_some());
    assert!(scene.view(ViewId::Coronal).crosshair().is_some());
}

#[test]
fn rebinding_clears_history() {
    let mut workspace = loaded_workspace();
    workspace.change_location(LocationUpdate::none().with(Axis::Z, 3));
    assert_eq!(workspace.history().len(), 1);

    let pair = phantom(Extents::new(4, 4, 4)).expect("phantom");
    workspace.bind_volumes(pair).expect("bind");
    assert!(workspace.history().is_empty());
    assert_eq!(workspace.scene().location(), Location4::default());
}

#[test]
fn location_change_refreshes_only_dependent_parts() {
    let mut workspace = loaded_workspace();
    let before = snapshot(&workspace);

    workspace.change_location(LocationUpdate::none().with(Axis::Z, 5));

    let after = snapshot(&workspace);
    let (axial_before, coronal_before) = (&before.views[0], &before.views[1]);
    let (axial_after, coronal_after) = (&after.views[0], &after.views[1]);
    assert_ne!(axial_before.2, axial_after.2, "axial slices along z");
    assert_eq!(axial_before.1, axial_after.1, "axial crosshair tracks y");
    assert_eq!(coronal_before.2, coronal_after.2, "coronal slices along y");
    assert_ne!(coronal_before.1, coronal_after.1, "coronal crosshair tracks z");
}

#[test]
fn out_of_range_location_pushes_nothing() {
    let mut workspace = loaded_workspace();
    assert!(
        workspace
            .change_location(LocationUpdate::none().with(Axis::X, 16))
            .is_none()
    );
    assert!(workspace.history().is_empty());
}

#[test]
fn location_changes_merge_and_undo_to_origin() {
    let mut workspace = loaded_workspace();
    workspace.change_location(LocationUpdate::none().with(Axis::X, 3));
    let outcome = workspace.change_location(LocationUpdate::none().with(Axis::Y, 4));
    assert_eq!(outcome, Some(PushOutcome::Merged));
    assert_eq!(workspace.scene().location(), Location4::new(3, 4, 0, 0));

    assert_eq!(workspace.undo(), Some("change location"));
    assert_eq!(workspace.scene().location(), Location4::default());
}

#[test]
fn pans_merge_within_one_gesture_only() {
    let mut workspace = loaded_workspace();

    workspace.begin_pan(ViewId::Axial);
    let outcomes = (0..3)
        .map(|_| workspace.pan(ViewId::Axial, Vec2::new(256.0, 0.0)))
        .collect::<Vec<_>>();
    workspace.end_pan(ViewId::Axial);
    assert_eq!(
        outcomes,
        vec![
            Some(PushOutcome::Appended),
            Some(PushOutcome::Merged),
            Some(PushOutcome::Merged)
        ]
    );
    assert_eq!(workspace.history().len(), 1);
    let translation = workspace.scene().view(ViewId::Axial).transform().translation();
    assert!((translation - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);

    workspace.begin_pan(ViewId::Axial);
    workspace.pan(ViewId::Axial, Vec2::new(0.0, 256.0));
    workspace.end_pan(ViewId::Axial);
    assert_eq!(workspace.history().len(), 2);

    workspace.undo();
    let translation = workspace.scene().view(ViewId::Axial).transform().translation();
    assert!((translation - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn idle_pans_never_merge() {
    let mut workspace = loaded_workspace();
    workspace.pan(ViewId::Coronal, Vec2::new(10.0, 0.0));
    workspace.pan(ViewId::Coronal, Vec2::new(10.0, 0.0));
    assert_eq!(workspace.history().len(), 2);
}

#[test]
fn separate_drags_stay_separate_with_one_pan_session() {
    let mut workspace = workspace_with(&ViewerConfig {
        pan_sessions: 1,
        ..ViewerConfig::default()
    });
    let drag = |workspace: &mut Workspace| {
        workspace.begin_pan(ViewId::Axial);
        let outcome = workspace.pan(ViewId::Axial, Vec2::new(10.0, 0.0));
        workspace.end_pan(ViewId::Axial);
        outcome
    };
    assert_eq!(drag(&mut workspace), Some(PushOutcome::Appended));
    assert_eq!(drag(&mut workspace), Some(PushOutcome::Appended));
    assert_eq!(workspace.history().len(), 2);
}

#[test]
fn wide_pan_session_range_wraps_on_coronal() {
    let mut workspace = workspace_with(&ViewerConfig {
        pan_sessions: 40_000,
        ..ViewerConfig::default()
    });
    let first = workspace.begin_pan(ViewId::Coronal);
    workspace.end_pan(ViewId::Coronal);
    for _ in 1..40_000 {
        workspace.begin_pan(ViewId::Coronal);
        workspace.end_pan(ViewId::Coronal);
    }
    assert_eq!(workspace.begin_pan(ViewId::Coronal), first);
    workspace.pan(ViewId::Coronal, Vec2::new(10.0, 0.0));
    workspace.end_pan(ViewId::Coronal);
    assert_eq!(workspace.history().len(), 1);
}

#[test]
fn reset_view_restores_both_views_in_one_undo() {
    let mut workspace = loaded_workspace();
    workspace.begin_pan(ViewId::Axial);
    workspace.pan(ViewId::Axial, Vec2::new(-128.0, 64.0));
    workspace.end_pan(ViewId::Axial);
    workspace.wheel(ViewId::Coronal, 240);
    let axial = workspace.scene().view(ViewId::Axial).view_state();
    let coronal = workspace.scene().view(ViewId::Coronal).view_state();
    assert!((coronal.scale - 1.1).abs() < 1e-6);

    workspace.reset_views();
    for id in ViewId::ALL {
        assert_eq!(workspace.scene().view(id).view_state(), ViewState::default());
    }

    assert_eq!(workspace.undo(), Some("reset views"));
    assert_eq!(workspace.scene().view(ViewId::Axial).view_state(), axial);
    assert_eq!(workspace.scene().view(ViewId::Coronal).view_state(), coronal);
}

#[test]
fn reset_of_default_views_is_not_recorded() {
    let mut workspace = loaded_workspace();
    assert!(workspace.reset_views().is_none());
    assert!(workspace.history().is_empty());
}

#[test]
fn out_of_range_display_values_are_rejected() {
    let mut workspace = loaded_workspace();
    assert!(matches!(
        workspace.set_brightness(1.5),
        Err(RuntimeError::OutOfRange { field: "brightness", .. })
    ));
    assert!(workspace.set_contrast(f32::NAN).is_err());
    assert!(workspace.set_primary_opacity(-0.1).is_err());
    assert!(workspace.set_brightness_threshold(-1.0).is_err());
    assert!(workspace.history().is_empty());
    assert_eq!(workspace.scene().display(), &DisplaySettings::default());

    assert_eq!(
        workspace.set_brightness_threshold(40.0).expect("valid"),
        Some(PushOutcome::Appended)
    );
}

#[test]
fn unchanged_values_are_not_recorded() {
    let mut workspace = loaded_workspace();
    assert_eq!(workspace.set_brightness(0.0).expect("valid"), None);
    assert_eq!(workspace.set_primary_color_map(ColorMap::Gray), None);
    assert_eq!(workspace.set_layer_visible(TracingLayer::Eat, true), None);
    assert!(workspace.history().is_empty());
}

#[test]
fn display_mode_change_rederives_both_views() {
    let mut workspace = loaded_workspace();
    let before = snapshot(&workspace);

    workspace.set_display_mode(DisplayMode::RatioA);

    for id in ViewId::ALL {
        let image = workspace.scene().view(id).image().expect("image");
        assert_ne!(Some(image), before.views[id.index()].2.as_ref());
        assert!(image.degenerate_pixels() > 0, "corners hold no signal");
    }
    workspace.undo();
    assert_eq!(snapshot(&workspace), before);
}

#[test]
fn rederivations_of_bound_volumes_queue_no_failures() {
    let mut workspace = loaded_workspace();
    workspace.change_location(LocationUpdate::none().with(Axis::Z, 7).with(Axis::Y, 11));
    workspace.set_display_mode(DisplayMode::RatioB);
    workspace.undo();
    workspace.undo();
    workspace.redo();
    assert!(workspace.take_failures().is_empty());
    assert!(workspace.scene().view(ViewId::Axial).last_failure().is_none());
}

#[test]
fn trace_strokes_add_and_erase_with_undo() {
    let mut workspace = loaded_workspace();
    let key = TraceKey {
        layer: TracingLayer::Eat,
        slice: 0,
    };

    workspace.begin_stroke(Vec2::new(256.0, 256.0)).expect("loaded");
    workspace.extend_stroke(Vec2::new(256.0, 256.0)).expect("stroke");
    workspace.finish_stroke().expect("stroke");
    assert_eq!(workspace.scene().traces().points(key), &[TracePoint::new(8, 6)]);

    workspace.set_draw_mode(DrawMode::Erase);
    workspace.begin_stroke(Vec2::new(260.0, 250.0)).expect("loaded");
    workspace.finish_stroke().expect("stroke");
    assert_eq!(workspace.scene().traces().total_points(), 0);

    assert_eq!(workspace.undo(), Some("erase trace points"));
    assert_eq!(workspace.scene().traces().points(key), &[TracePoint::new(8, 6)]);
    workspace.undo();
    workspace.undo();
    assert_eq!(workspace.scene().traces().total_points(), 0);
}

#[test]
fn strokes_need_volumes_and_a_start() {
    let mut workspace = Workspace::new(&ViewerConfig::default());
    assert!(matches!(
        workspace.begin_stroke(Vec2::ZERO),
        Err(RuntimeError::NotLoaded)
    ));
    assert!(matches!(
        workspace.extend_stroke(Vec2::ZERO),
        Err(RuntimeError::NoStroke)
    ));
    assert!(matches!(workspace.finish_stroke(), Err(RuntimeError::NoStroke)));
}

#[test]
fn stroke_smoothing_relaxes_trailing_points() {
    let mut stroke = TraceStroke::new(Vec2::ZERO);
    for x in 1..=4 {
        stroke.push(Vec2::new(x as f32 * 4.0, 0.0));
    }
    let xs = stroke.points().iter().map(|p| p.x).collect::<Vec<_>>();
    assert_eq!(xs, vec![0.0, 7.5, 11.0, 14.0, 16.0]);
}

#[test]
fn undo_all_then_redo_all_is_bit_identical() {
    let mut workspace = loaded_workspace();
    let initial = snapshot(&workspace);

    workspace.pan(ViewId::Axial, Vec2::new(12.0, -7.0));
    workspace.begin_pan(ViewId::Coronal);
    workspace.pan(ViewId::Coronal, Vec2::new(3.0, 3.0));
    workspace.pan(ViewId::Coronal, Vec2::new(-1.0, 9.0));
    workspace.end_pan(ViewId::Coronal);
    workspace.wheel(ViewId::Axial, 120);
    workspace.change_location(LocationUpdate::none().with(Axis::Z, 5).with(Axis::Y, 3));
    workspace.set_brightness(0.4).expect("valid");
    workspace.set_contrast(0.7).expect("valid");
    workspace.set_display_mode(DisplayMode::RatioB);
    workspace.set_primary_color_map(ColorMap::Jet);
    workspace.set_layer_visible(TracingLayer::Pat, false);
    workspace.set_tracing_layer(TracingLayer::Vat);
    workspace.begin_stroke(Vec2::new(200.0, 300.0)).expect("loaded");
    workspace.extend_stroke(Vec2::new(220.0, 310.0)).expect("stroke");
    workspace.finish_stroke().expect("stroke");
    workspace.reset_views();
    workspace.change_location(LocationUpdate::none().with(Axis::X, 2));
    let last = snapshot(&workspace);

    while workspace.undo().is_some() {}
    assert_eq!(snapshot(&workspace), initial);

    while workspace.redo().is_some() {}
    assert_eq!(snapshot(&workspace), last);
}

#[test]
fn present_hands_over_images_and_crosshairs() {
    let mut workspace = loaded_workspace();
    workspace.zoom(ViewId::Axial, 1.0);
    let mut recorder = Recorder::default();
    workspace.present(&mut recorder);

    assert_eq!(recorder.images.len(), 2);
    assert_eq!(recorder.crosshairs.len(), 2);
    let (view, width, height, mvp) = recorder.images[0];
    assert_eq!((view, width, height), (ViewId::Axial, 16, 12));
    assert_eq!(mvp, Mat4::from_scale(Vec3::splat(2.0)));
}

#[test]
fn present_skips_views_without_frames() {
    let workspace = Workspace::new(&ViewerConfig::default());
    let mut recorder = Recorder::default();
    workspace.present(&mut recorder);
    assert!(recorder.images.is_empty());
    assert!(recorder.crosshairs.is_empty());
}

#[test]
fn failed_derivation_keeps_last_good_frame() {
    let pair = phantom(Extents::new(8, 6, 4)).expect("phantom");
    let mut view = SliceView::new(ViewId::Axial, Viewport::default());
    view.refresh_image(
        &pair,
        DisplayMode::RawChannelA,
        Location4::default(),
        RatioPolicy::Zero,
    )
    .expect("derive");
    let good = view.image().cloned();

    let error = view
        .refresh_image(
            &pair,
            DisplayMode::RawChannelA,
            Location4::new(0, 0, 9, 0),
            RatioPolicy::Zero,
        )
        .unwrap_err();
    assert!(matches!(error, SliceError::Empty { depth: 9, .. }));
    assert_eq!(view.image().cloned(), good);
    assert!(view.last_failure().is_some());
}

#[test]
fn window_pixels_map_to_slice_voxels() {
    let workspace = loaded_workspace();
    let extents = workspace.scene().extents().expect("bound");
    let view = workspace.scene().view(ViewId::Axial);
    assert_eq!(
        view.window_to_voxel(Vec2::new(0.0, 512.0), &extents),
        Some(TracePoint::new(0, 0))
    );
    assert_eq!(
        view.window_to_voxel(Vec2::new(512.0, 0.0), &extents),
        Some(TracePoint::new(15, 11))
    );
}
