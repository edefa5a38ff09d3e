use serde::{Deserialize, Serialize};

use crate::model::{Extents, Location4};
use crate::runtime::{DisplaySettings, ViewId};
use crate::slice::ImageStats;
use crate::view::{CrosshairSegment, ViewState};

/// What a step did to the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// New history entry.
    Appended,
    /// Folded into the previous history entry.
    Merged,
    /// Applied without touching history (gesture bookkeeping, resizes).
    Done,
    /// Nothing changed: a no-op value or an empty undo/redo side.
    Ignored,
    Undone { label: String },
    Redone { label: String },
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub intent: String,
    pub duration_ms: u128,
    pub outcome: StepOutcome,
    /// Slices that failed to re-derive during the step; the view kept its
    /// last frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slice_failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewSnapshot {
    pub view: ViewId,
    pub state: ViewState,
    pub crosshair: Option<CrosshairSegment>,
    pub image: Option<ImageStats>,
    pub last_failure: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub location: Location4,
    pub display: DisplaySettings,
    pub views: Vec<ViewSnapshot>,
    pub trace_points: usize,
    pub history_depth: usize,
    pub undo_labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub session_name: Option<String>,
    pub extents: Extents,
    pub steps: Vec<StepReport>,
    pub final_state: SessionSnapshot,
}
