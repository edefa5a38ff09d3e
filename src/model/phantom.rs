use ndarray::Array3;

use super::{Extents, Result, Volume, VolumePair};

/// Synthetic fat/water pair: an elliptical body whose outer rim is fat and
/// whose interior is water, with a mild intensity ramp along z so that
/// neighbouring slices differ.
pub fn phantom(extents: Extents) -> Result<VolumePair> {
    let shape = (extents.z, extents.y, extents.x);
    let cx = (extents.x as f32 - 1.0) * 0.5;
    let cy = (extents.y as f32 - 1.0) * 0.5;
    let rx = (extents.x as f32 * 0.5).max(1.0);
    let ry = (extents.y as f32 * 0.5).max(1.0);

    let radius = |y: usize, x: usize| {
        let dx = (x as f32 - cx) / rx;
        let dy = (y as f32 - cy) / ry;
        (dx * dx + dy * dy).sqrt()
    };

    let fat = Array3::from_shape_fn(shape, |(z, y, x)| {
        let r = radius(y, x);
        let ramp = z as f32;
        if (0.7..=1.0).contains(&r) {
            200.0 + ramp
        } else if r < 0.7 {
            20.0 + ramp * 0.5
        } else {
            0.0
        }
    });
    let water = Array3::from_shape_fn(shape, |(z, y, x)| {
        let r = radius(y, x);
        if r < 0.7 {
            150.0 + z as f32 + x as f32
        } else if r <= 1.0 {
            30.0
        } else {
            0.0
        }
    });

    VolumePair::new(Volume::new(fat)?, Volume::new(water)?)
}
