use serde::{Deserialize, Serialize};

use crate::slice::DisplayMode;

use super::{Result, RuntimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMap {
    Autumn,
    Bone,
    Cool,
    Copper,
    #[default]
    Gray,
    Hot,
    Hsv,
    Jet,
    Parula,
    Pink,
    Spring,
    Summer,
    Winter,
}

/// Tissue compartment a trace belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TracingLayer {
    #[default]
    Eat,
    Imat,
    Pat,
    Pvat,
    Scat,
    Vat,
}

impl TracingLayer {
    pub const ALL: [TracingLayer; 6] = [
        TracingLayer::Eat,
        TracingLayer::Imat,
        TracingLayer::Pat,
        TracingLayer::Pvat,
        TracingLayer::Scat,
        TracingLayer::Vat,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Points,
    Erase,
}

/// Everything the presentation layer needs besides the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub display_mode: DisplayMode,
    pub brightness: f32,
    pub brightness_threshold: f32,
    pub contrast: f32,
    pub primary_color_map: ColorMap,
    pub secondary_color_map: ColorMap,
    pub primary_opacity: f32,
    pub secondary_opacity: f32,
    pub tracing_layer: TracingLayer,
    pub layer_visible: [bool; 6],
    pub draw_mode: DrawMode,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            brightness: 0.0,
            brightness_threshold: 0.0,
            contrast: 1.0,
            primary_color_map: ColorMap::Gray,
            secondary_color_map: ColorMap::Gray,
            primary_opacity: 1.0,
            secondary_opacity: 1.0,
            tracing_layer: TracingLayer::default(),
            layer_visible: [true; 6],
            draw_mode: DrawMode::default(),
        }
    }
}

/// Rejects anything outside [0, 1], NaN included.
pub(crate) fn check_unit(field: &'static str, value: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        log::debug!("ignoring {field} {value}: outside [0, 1]");
        Err(RuntimeError::OutOfRange { field, value })
    }
}

pub(crate) fn check_threshold(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        log::debug!("ignoring brightness threshold {value}");
        Err(RuntimeError::OutOfRange {
            field: "brightness threshold",
            value,
        })
    }
}

impl DisplaySettings {
    pub fn is_layer_visible(&self, layer: TracingLayer) -> bool {
        self.layer_visible[layer.index()]
    }

    pub fn set_layer_visible(&mut self, layer: TracingLayer, visible: bool) {
        self.layer_visible[layer.index()] = visible;
    }
}
