use std::time::Instant;

use glam::Vec2;

use crate::config::ViewerConfig;
use crate::history::PushOutcome;
use crate::model::phantom;
use crate::runtime::{self, ViewId, Workspace};
use crate::view::Viewport;

use super::{
    Intent, Result, SessionReport, SessionScript, SessionSnapshot, StepOutcome, StepReport,
    ViewSnapshot,
};

/// Replays `script` on a fresh workspace bound to a phantom pair. Rejected
/// intents are reported per step and do not stop the run.
pub fn run_session(script: &SessionScript, config: &ViewerConfig) -> Result<SessionReport> {
    script.validate()?;
    config.validate()?;

    let mut workspace = Workspace::new(config);
    workspace.bind_volumes(phantom(script.extents)?)?;

    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, intent) in script.steps.iter().enumerate() {
        let started = Instant::now();
        let outcome = apply_intent(&mut workspace, intent);
        let duration_ms = started.elapsed().as_millis();
        if let StepOutcome::Rejected { reason } = &outcome {
            log::warn!("step {index} ({}) rejected: {reason}", intent.name());
        }
        let slice_failures = workspace
            .take_failures()
            .into_iter()
            .map(|(view, error)| format!("{view:?}: {error}"))
            .collect();
        steps.push(StepReport {
            index,
            intent: intent.name().to_string(),
            duration_ms,
            outcome,
            slice_failures,
        });
    }

    Ok(SessionReport {
        session_name: script.name.clone(),
        extents: script.extents,
        steps,
        final_state: snapshot(&workspace),
    })
}

fn pushed(outcome: Option<PushOutcome>) -> StepOutcome {
    match outcome {
        Some(PushOutcome::Appended) => StepOutcome::Appended,
        Some(PushOutcome::Merged) => StepOutcome::Merged,
        None => StepOutcome::Ignored,
    }
}

fn checked(result: runtime::Result<Option<PushOutcome>>) -> StepOutcome {
    match result {
        Ok(outcome) => pushed(outcome),
        Err(error) => StepOutcome::Rejected {
            reason: error.to_string(),
        },
    }
}

fn done(result: runtime::Result<()>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Done,
        Err(error) => StepOutcome::Rejected {
            reason: error.to_string(),
        },
    }
}

fn apply_intent(workspace: &mut Workspace, intent: &Intent) -> StepOutcome {
    match intent {
        Intent::BeginPan { view } => {
            workspace.begin_pan(*view);
            StepOutcome::Done
        }
        Intent::Pan { view, dx, dy } => pushed(workspace.pan(*view, Vec2::new(*dx, *dy))),
        Intent::EndPan { view } => {
            workspace.end_pan(*view);
            StepOutcome::Done
        }
        Intent::Zoom { view, delta } => pushed(workspace.zoom(*view, *delta)),
        Intent::Wheel { view, angle_delta } => pushed(workspace.wheel(*view, *angle_delta)),
        Intent::Resize {
            view,
            width,
            height,
        } => {
            if *width == 0 || *height == 0 {
                return StepOutcome::Rejected {
                    reason: format!("viewport {width}x{height} is empty"),
                };
            }
            workspace.resize(*view, Viewport::new(*width, *height));
            StepOutcome::Done
        }
        Intent::ResetViews => pushed(workspace.reset_views()),
        Intent::ChangeLocation(update) => pushed(workspace.change_location(*update)),
        Intent::SetBrightness { value } => checked(workspace.set_brightness(*value)),
        Intent::SetBrightnessThreshold { value } => {
            checked(workspace.set_brightness_threshold(*value))
        }
        Intent::SetContrast { value } => checked(workspace.set_contrast(*value)),
        Intent::SetPrimaryOpacity { value } => checked(workspace.set_primary_opacity(*value)),
        Intent::SetSecondaryOpacity { value } => checked(workspace.set_secondary_opacity(*value)),
        Intent::SetPrimaryColorMap { map } => pushed(workspace.set_primary_color_map(*map)),
        Intent::SetSecondaryColorMap { map } => pushed(workspace.set_secondary_color_map(*map)),
        Intent::SetDisplayMode { mode } => pushed(workspace.set_display_mode(*mode)),
        Intent::SetDrawMode { mode } => pushed(workspace.set_draw_mode(*mode)),
        Intent::SetTracingLayer { layer } => pushed(workspace.set_tracing_layer(*layer)),
        Intent::SetLayerVisible { layer, visible } => {
            pushed(workspace.set_layer_visible(*layer, *visible))
        }
        Intent::BeginStroke { x, y } => done(workspace.begin_stroke(Vec2::new(*x, *y))),
        Intent::ExtendStroke { x, y } => done(workspace.extend_stroke(Vec2::new(*x, *y))),
        Intent::FinishStroke => checked(workspace.finish_stroke()),
        Intent::Undo => workspace
            .undo()
            .map_or(StepOutcome::Ignored, |label| StepOutcome::Undone {
                label: label.to_string(),
            }),
        Intent::Redo => workspace
            .redo()
            .map_or(StepOutcome::Ignored, |label| StepOutcome::Redone {
                label: label.to_string(),
            }),
    }
}

fn snapshot(workspace: &Workspace) -> SessionSnapshot {
    let scene = workspace.scene();
    let views = ViewId::ALL
        .into_iter()
        .map(|id| {
            let view = scene.view(id);
            ViewSnapshot {
                view: id,
                state: view.view_state(),
                crosshair: view.crosshair().copied(),
                image: view.image().map(|image| image.stats()),
                last_failure: view.last_failure().map(ToString::to_string),
            }
        })
        .collect();
    SessionSnapshot {
        location: scene.location(),
        display: scene.display().clone(),
        views,
        trace_points: scene.traces().total_points(),
        history_depth: workspace.history().cursor(),
        undo_labels: workspace
            .history()
            .undo_labels()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
