use serde::{Deserialize, Serialize};

use crate::slice::RatioPolicy;
use crate::view::Viewport;

use super::{ConfigError, Result};

const MAX_PAN_SESSIONS: u16 = 4096;

/// Tunables of the viewer engine. Every field has a default, so a config file
/// only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Maximum undo depth; `None` keeps every entry.
    pub history_capacity: Option<usize>,
    pub ratio_policy: RatioPolicy,
    /// Distinct pan session ids per view before they wrap.
    pub pan_sessions: u16,
    /// Scale change per wheel notch.
    pub wheel_zoom_per_notch: f32,
    /// Erase reach around each stroke voxel, in voxels.
    pub erase_radius: f32,
    pub axial_viewport: Viewport,
    pub coronal_viewport: Viewport,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            history_capacity: None,
            ratio_policy: RatioPolicy::default(),
            pan_sessions: 16,
            wheel_zoom_per_notch: 0.05,
            erase_radius: 2.0,
            axial_viewport: Viewport::default(),
            coronal_viewport: Viewport::default(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "history capacity must be at least 1 when set".to_string(),
            ));
        }
        if !(2..=MAX_PAN_SESSIONS).contains(&self.pan_sessions) {
            return Err(ConfigError::Invalid(format!(
                "pan sessions must lie in 2..={MAX_PAN_SESSIONS}, got {}",
                self.pan_sessions
            )));
        }
        if !self.wheel_zoom_per_notch.is_finite() || self.wheel_zoom_per_notch <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "wheel zoom per notch must be positive, got {}",
                self.wheel_zoom_per_notch
            )));
        }
        if !self.erase_radius.is_finite() || self.erase_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "erase radius must be non-negative, got {}",
                self.erase_radius
            )));
        }
        for (name, viewport) in [
            ("axial", self.axial_viewport),
            ("coronal", self.coronal_viewport),
        ] {
            if viewport.width == 0 || viewport.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} viewport must not be empty"
                )));
            }
        }
        Ok(())
    }
}
