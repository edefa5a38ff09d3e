use std::fs;

use tempfile::tempdir;

use super::{
    Intent, SessionError, SessionReport, SessionScript, StepOutcome, load_script, run_session,
    save_report,
};
use crate::config::ViewerConfig;
use crate::model::{Axis, Extents, Location4, LocationUpdate};
use crate::runtime::{TracingLayer, ViewId};
use crate::slice::DisplayMode;

fn script(steps: Vec<Intent>) -> SessionScript {
    SessionScript {
        name: Some("test".to_string()),
        extents: Extents::new(16, 12, 8),
        steps,
    }
}

fn outcomes(report: &SessionReport) -> Vec<StepOutcome> {
    report
        .steps
        .iter()
        .map(|step| step.outcome.clone())
        .collect()
}

#[test]
fn session_executes_in_order() {
    let script = script(vec![
        Intent::BeginPan {
            view: ViewId::Axial,
        },
        Intent::Pan {
            view: ViewId::Axial,
            dx: 10.0,
            dy: 0.0,
        },
        Intent::Pan {
            view: ViewId::Axial,
            dx: 10.0,
            dy: 5.0,
        },
        Intent::EndPan {
            view: ViewId::Axial,
        },
        Intent::ChangeLocation(LocationUpdate::none().with(Axis::Z, 4)),
        Intent::SetBrightness { value: 3.0 },
        Intent::SetDisplayMode {
            mode: DisplayMode::RatioB,
        },
        Intent::Undo,
    ]);
    let report = run_session(&script, &ViewerConfig::default()).expect("session");

    assert_eq!(report.steps.len(), 8);
    assert_eq!(report.steps[5].intent, "set_brightness");
    let outcomes = outcomes(&report);
    assert_eq!(outcomes[0], StepOutcome::Done);
    assert_eq!(outcomes[1], StepOutcome::Appended);
    assert_eq!(outcomes[2], StepOutcome::Merged);
    assert_eq!(outcomes[4], StepOutcome::Appended);
    assert!(matches!(outcomes[5], StepOutcome::Rejected { .. }));
    assert_eq!(
        outcomes[7],
        StepOutcome::Undone {
            label: "change display mode".to_string()
        }
    );

    let state = &report.final_state;
    assert_eq!(state.location, Location4::new(0, 0, 4, 0));
    assert_eq!(state.display.display_mode, DisplayMode::RawChannelA);
    assert_eq!(state.history_depth, 2);
    assert_eq!(state.undo_labels, vec!["move view", "change location"]);
    let axial = &state.views[0];
    assert_eq!(axial.view, ViewId::Axial);
    let image = axial.image.as_ref().expect("axial image");
    assert_eq!((image.width, image.height), (16, 12));
    assert!(axial.last_failure.is_none());
    assert!(report.steps.iter().all(|step| step.slice_failures.is_empty()));
}

#[test]
fn stroke_steps_record_traces() {
    let script = script(vec![
        Intent::SetTracingLayer {
            layer: TracingLayer::Scat,
        },
        Intent::BeginStroke { x: 100.0, y: 100.0 },
        Intent::ExtendStroke { x: 140.0, y: 100.0 },
        Intent::FinishStroke,
        Intent::FinishStroke,
    ]);
    let report = run_session(&script, &ViewerConfig::default()).expect("session");
    let outcomes = outcomes(&report);
    assert_eq!(outcomes[3], StepOutcome::Appended);
    assert!(matches!(outcomes[4], StepOutcome::Rejected { .. }));
    assert_eq!(report.final_state.trace_points, 2);
}

#[test]
fn empty_or_degenerate_scripts_are_rejected() {
    let config = ViewerConfig::default();
    assert!(matches!(
        run_session(&script(vec![]), &config),
        Err(SessionError::Parse(_))
    ));
    let flat = SessionScript {
        extents: Extents::new(4, 0, 4),
        ..script(vec![Intent::Undo])
    };
    assert!(matches!(
        run_session(&flat, &config),
        Err(SessionError::Parse(_))
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let config = ViewerConfig {
        history_capacity: Some(0),
        ..ViewerConfig::default()
    };
    assert!(matches!(
        run_session(&script(vec![Intent::Undo]), &config),
        Err(SessionError::Config(_))
    ));
}

#[test]
fn yaml_script_loads_and_report_saves() {
    let dir = tempdir().expect("tempdir");
    let script_path = dir.path().join("session.yaml");
    fs::write(
        &script_path,
        "name: yaml\nextents: {x: 8, y: 8, z: 4}\nsteps:\n  - intent: change_location\n    x: 3\n    z: 2\n  - intent: wheel\n    view: coronal\n    angle_delta: 120\n  - intent: reset_views\n  - intent: undo\n",
    )
    .expect("write");

    let script = load_script(&script_path).expect("load");
    assert_eq!(script.steps.len(), 4);
    assert_eq!(
        script.steps[0],
        Intent::ChangeLocation(LocationUpdate::none().with(Axis::X, 3).with(Axis::Z, 2))
    );

    let report = run_session(&script, &ViewerConfig::default()).expect("session");
    assert_eq!(report.final_state.location, Location4::new(3, 0, 2, 0));
    let coronal = &report.final_state.views[1];
    assert!((coronal.state.scale - 1.05).abs() < 1e-6);

    let report_path = dir.path().join("report.json");
    save_report(&report_path, &report).expect("save");
    let raw = fs::read_to_string(&report_path).expect("read");
    let parsed: SessionReport = serde_json::from_str(&raw).expect("parse");
    assert_eq!(parsed.steps.len(), 4);
    assert_eq!(parsed.session_name.as_deref(), Some("yaml"));
}
