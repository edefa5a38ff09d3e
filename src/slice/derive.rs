use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::model::{Channel, VolumeProvider};

use super::{DisplayMode, RatioPolicy, Result, SliceError, normalize_min_max, ratio};

/// Single-channel slice image rescaled into [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    data: Array2<f32>,
    degenerate_pixels: usize,
}

impl NormalizedImage {
    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get([row, col]).copied()
    }

    /// Pixels where a ratio mode met a zero denominator.
    pub fn degenerate_pixels(&self) -> usize {
        self.degenerate_pixels
    }

    /// Min and max over finite values, `None` when there are none.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }

    pub fn stats(&self) -> ImageStats {
        let (min, max) = self.min_max().unwrap_or((0.0, 0.0));
        let finite = self.data.iter().filter(|value| value.is_finite()).count();
        let sum: f64 = self
            .data
            .iter()
            .filter(|value| value.is_finite())
            .map(|value| f64::from(*value))
            .sum();
        ImageStats {
            width: self.width(),
            height: self.height(),
            min,
            max,
            mean: if finite > 0 { (sum / finite as f64) as f32 } else { 0.0 },
            degenerate_pixels: self.degenerate_pixels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    pub width: usize,
    pub height: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub degenerate_pixels: usize,
}

fn fetch_normalized<P: VolumeProvider + ?Sized>(
    provider: &P,
    channel: Channel,
    depth: usize,
    along_depth_axis: bool,
) -> Result<Array2<f32>> {
    let view = provider
        .fetch_slice(depth, along_depth_axis)
        .ok_or(SliceError::Empty { channel, depth })?;
    normalize_min_max(view)
}

/// Builds the image shown for `mode` at `depth` from the fat (`a`) and water
/// (`b`) providers. Neither provider is mutated.
pub fn derive_slice<P: VolumeProvider + ?Sized>(
    a: &P,
    b: &P,
    mode: DisplayMode,
    depth: usize,
    along_depth_axis: bool,
    policy: RatioPolicy,
) -> Result<NormalizedImage> {
    let provider = |channel: Channel| match channel {
        Channel::A => a,
        Channel::B => b,
    };

    let single = |channel: Channel| -> Result<(Array2<f32>, usize)> {
        Ok((
            fetch_normalized(provider(channel), channel, depth, along_depth_axis)?,
            0,
        ))
    };
    let fraction = |numerator: Channel, other: Channel| -> Result<(Array2<f32>, usize)> {
        let numerator_slice =
            fetch_normalized(provider(numerator), numerator, depth, along_depth_axis)?;
        let other_slice = fetch_normalized(provider(other), other, depth, along_depth_axis)?;
        ratio(&numerator_slice, &other_slice, policy)
    };

    let (data, degenerate_pixels) = match mode.channels() {
        &[numerator, other] if mode.is_ratio() => fraction(numerator, other)?,
        &[channel] => single(channel)?,
        channels => {
            return Err(SliceError::UnsupportedLayout(format!(
                "{mode:?} lists {} channels",
                channels.len()
            )));
        }
    };

    Ok(NormalizedImage {
        data,
        degenerate_pixels,
    })
}
