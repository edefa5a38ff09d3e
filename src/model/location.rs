use serde::{Deserialize, Serialize};

use super::{Axis, ChangedAxes};

/// Cursor inside a bound volume pair: two in-plane axes, the depth axis and an
/// auxiliary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location4 {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub w: usize,
}

impl Location4 {
    pub const fn new(x: usize, y: usize, z: usize, w: usize) -> Self {
        Self { x, y, z, w }
    }

    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::W => self.w,
        }
    }

    fn set(&mut self, axis: Axis, value: usize) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::W => self.w = value,
        }
    }
}

/// Requested cursor move. `None` leaves that axis untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationUpdate {
    #[serde(default)]
    pub x: Option<usize>,
    #[serde(default)]
    pub y: Option<usize>,
    #[serde(default)]
    pub z: Option<usize>,
    #[serde(default)]
    pub w: Option<usize>,
}

impl LocationUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all(location: Location4) -> Self {
        Self {
            x: Some(location.x),
            y: Some(location.y),
            z: Some(location.z),
            w: Some(location.w),
        }
    }

    pub fn with(mut self, axis: Axis, value: usize) -> Self {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::W => &mut self.w,
        };
        *slot = Some(value);
        self
    }

    pub fn get(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::W => self.w,
        }
    }
}

impl From<Location4> for LocationUpdate {
    fn from(location: Location4) -> Self {
        Self::all(location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extents {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Extents {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Exclusive upper bound for `axis`. The auxiliary axis is unbounded.
    pub fn limit(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::X => Some(self.x),
            Axis::Y => Some(self.y),
            Axis::Z => Some(self.z),
            Axis::W => None,
        }
    }

    pub fn contains(&self, axis: Axis, value: usize) -> bool {
        self.limit(axis).is_none_or(|limit| value < limit)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationModel {
    location: Location4,
    extents: Option<Extents>,
}

impl LocationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds new extents and moves the cursor back to the origin.
    pub fn bind(&mut self, extents: Extents) {
        self.extents = Some(extents);
        self.location = Location4::default();
    }

    pub fn is_bound(&self) -> bool {
        self.extents.is_some()
    }

    pub fn extents(&self) -> Option<Extents> {
        self.extents
    }

    pub fn location(&self) -> Location4 {
        self.location
    }

    /// Location that `set_location` would produce for `update`, without
    /// mutating anything.
    pub fn resolve(&self, update: &LocationUpdate) -> Location4 {
        let Some(extents) = self.extents else {
            return self.location;
        };
        let mut next = self.location;
        for axis in Axis::ALL {
            if let Some(value) = update.get(axis)
                && extents.contains(axis, value)
            {
                next.set(axis, value);
            }
        }
        next
    }

    /// Applies every supplied, in-range field of `update` and reports the axes
    /// whose value actually changed. Out-of-range fields are skipped.
    pub fn set_location(&mut self, update: &LocationUpdate) -> ChangedAxes {
        if !self.is_bound() {
            return ChangedAxes::empty();
        }
        let next = self.resolve(update);
        let changed = Axis::ALL
            .into_iter()
            .filter(|axis| next.get(*axis) != self.location.get(*axis))
            .collect::<ChangedAxes>();
        self.location = next;
        changed
    }
}
