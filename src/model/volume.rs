use ndarray::{Array3, ArrayView2, Axis as ArrayAxis};
use serde::{Deserialize, Serialize};

use super::{Axis, Extents, ModelError, Result};

/// Read-only access to a 3D intensity array.
pub trait VolumeProvider {
    fn extent(&self, axis: Axis) -> usize;

    /// Returns the axial slice `[y, x]` at `z = depth` when `along_depth_axis`
    /// is set, otherwise the coronal slice `[z, x]` at `y = depth`. Returns
    /// `None` for an out-of-range depth.
    fn fetch_slice(&self, depth: usize, along_depth_axis: bool) -> Option<ArrayView2<'_, f32>>;

    fn extents(&self) -> Extents {
        Extents::new(
            self.extent(Axis::X),
            self.extent(Axis::Y),
            self.extent(Axis::Z),
        )
    }
}

/// Single intensity channel stored in `[z, y, x]` order.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array3<f32>,
}

impl Volume {
    pub fn new(data: Array3<f32>) -> Result<Self> {
        for (index, size) in data.shape().iter().enumerate() {
            if *size == 0 {
                let axis = ["z", "y", "x"][index];
                return Err(ModelError::ZeroSizedAxis { axis });
            }
        }
        Ok(Self { data })
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn shape(&self) -> [usize; 3] {
        let (z, y, x) = self.data.dim();
        [z, y, x]
    }
}

impl VolumeProvider for Volume {
    fn extent(&self, axis: Axis) -> usize {
        let (z, y, x) = self.data.dim();
        match axis {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
            Axis::W => 0,
        }
    }

    fn fetch_slice(&self, depth: usize, along_depth_axis: bool) -> Option<ArrayView2<'_, f32>> {
        let array_axis = if along_depth_axis {
            ArrayAxis(0)
        } else {
            ArrayAxis(1)
        };
        if depth >= self.data.len_of(array_axis) {
            return None;
        }
        Some(self.data.index_axis(array_axis, depth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Fat intensity.
    A,
    /// Water intensity.
    B,
}

/// Fat (A) and water (B) channels covering the same grid.
#[derive(Debug, Clone)]
pub struct VolumePair {
    a: Volume,
    b: Volume,
}

impl VolumePair {
    pub fn new(a: Volume, b: Volume) -> Result<Self> {
        if a.shape() != b.shape() {
            return Err(ModelError::ShapeMismatch {
                a: a.shape(),
                b: b.shape(),
            });
        }
        Ok(Self { a, b })
    }

    pub fn channel(&self, channel: Channel) -> &Volume {
        match channel {
            Channel::A => &self.a,
            Channel::B => &self.b,
        }
    }

    pub fn extents(&self) -> Extents {
        self.a.extents()
    }
}
