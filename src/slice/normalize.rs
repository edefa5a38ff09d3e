use ndarray::{Array2, ArrayView2, Zip};
use rayon::prelude::*;

use super::{RatioPolicy, Result, SliceError};

fn min_max(view: &ArrayView2<'_, f32>) -> (f32, f32) {
    let mut iter = view.iter().copied();
    let first = iter.next().unwrap_or(0.0);
    iter.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    })
}

/// Rescales a slice into [0, 1] by its own observed min and max. The result is
/// a fresh buffer; a flat slice maps to zeros.
pub fn normalize_min_max(view: ArrayView2<'_, f32>) -> Result<Array2<f32>> {
    let (min, max) = min_max(&view);
    let range = max - min;
    let mut values = view.iter().copied().collect::<Vec<_>>();
    values.par_iter_mut().for_each(|value| {
        *value = if range > 0.0 {
            (*value - min) / range
        } else {
            0.0
        };
    });
    Array2::from_shape_vec(view.raw_dim(), values)
        .map_err(|error| SliceError::UnsupportedLayout(error.to_string()))
}

/// Elementwise `numerator / (numerator + other)`. Returns the ratio image and
/// the number of pixels where the denominator was zero.
pub fn ratio(
    numerator: &Array2<f32>,
    other: &Array2<f32>,
    policy: RatioPolicy,
) -> Result<(Array2<f32>, usize)> {
    if numerator.dim() != other.dim() {
        return Err(SliceError::UnsupportedLayout(format!(
            "channel slices differ in shape: {:?} vs {:?}",
            numerator.dim(),
            other.dim()
        )));
    }
    let output = Zip::from(numerator)
        .and(other)
        .par_map_collect(|&n, &o| {
            let denominator = n + o;
            match policy {
                RatioPolicy::Zero if denominator == 0.0 => 0.0,
                _ => n / denominator,
            }
        });
    let degenerate = Zip::from(numerator)
        .and(other)
        .fold(0usize, |count, &n, &o| count + usize::from(n + o == 0.0));
    Ok((output, degenerate))
}
