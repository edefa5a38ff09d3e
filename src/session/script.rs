use serde::{Deserialize, Serialize};

use crate::model::{Extents, LocationUpdate};
use crate::runtime::{ColorMap, DrawMode, TracingLayer, ViewId};
use crate::slice::DisplayMode;

use super::{Result, SessionError};

/// Recorded sequence of user intents replayed against a phantom pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionScript {
    pub name: Option<String>,
    pub extents: Extents,
    #[serde(default)]
    pub steps: Vec<Intent>,
}

/// One workspace intent. Pixel coordinates are window pixels of the view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    BeginPan { view: ViewId },
    Pan { view: ViewId, dx: f32, dy: f32 },
    EndPan { view: ViewId },
    Zoom { view: ViewId, delta: f32 },
    Wheel { view: ViewId, angle_delta: i32 },
    Resize { view: ViewId, width: u32, height: u32 },
    ResetViews,
    ChangeLocation(LocationUpdate),
    SetBrightness { value: f32 },
    SetBrightnessThreshold { value: f32 },
    SetContrast { value: f32 },
    SetPrimaryOpacity { value: f32 },
    SetSecondaryOpacity { value: f32 },
    SetPrimaryColorMap { map: ColorMap },
    SetSecondaryColorMap { map: ColorMap },
    SetDisplayMode { mode: DisplayMode },
    SetDrawMode { mode: DrawMode },
    SetTracingLayer { layer: TracingLayer },
    SetLayerVisible { layer: TracingLayer, visible: bool },
    BeginStroke { x: f32, y: f32 },
    ExtendStroke { x: f32, y: f32 },
    FinishStroke,
    Undo,
    Redo,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginPan { .. } => "begin_pan",
            Self::Pan { .. } => "pan",
            Self::EndPan { .. } => "end_pan",
            Self::Zoom { .. } => "zoom",
            Self::Wheel { .. } => "wheel",
            Self::Resize { .. } => "resize",
            Self::ResetViews => "reset_views",
            Self::ChangeLocation(_) => "change_location",
            Self::SetBrightness { .. } => "set_brightness",
            Self::SetBrightnessThreshold { .. } => "set_brightness_threshold",
            Self::SetContrast { .. } => "set_contrast",
            Self::SetPrimaryOpacity { .. } => "set_primary_opacity",
            Self::SetSecondaryOpacity { .. } => "set_secondary_opacity",
            Self::SetPrimaryColorMap { .. } => "set_primary_color_map",
            Self::SetSecondaryColorMap { .. } => "set_secondary_color_map",
            Self::SetDisplayMode { .. } => "set_display_mode",
            Self::SetDrawMode { .. } => "set_draw_mode",
            Self::SetTracingLayer { .. } => "set_tracing_layer",
            Self::SetLayerVisible { .. } => "set_layer_visible",
            Self::BeginStroke { .. } => "begin_stroke",
            Self::ExtendStroke { .. } => "extend_stroke",
            Self::FinishStroke => "finish_stroke",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

impl SessionScript {
    pub fn validate(&self) -> Result<()> {
        let Extents { x, y, z } = self.extents;
        if x == 0 || y == 0 || z == 0 {
            return Err(SessionError::Parse(format!(
                "extents must be non-zero, got {x}x{y}x{z}"
            )));
        }
        if self.steps.is_empty() {
            return Err(SessionError::Parse(
                "session must include at least one step".to_string(),
            ));
        }
        Ok(())
    }
}
