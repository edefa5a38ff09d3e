use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::W];

    const fn bit(self) -> u8 {
        match self {
            Self::X => 0b0001,
            Self::Y => 0b0010,
            Self::Z => 0b0100,
            Self::W => 0b1000,
        }
    }
}

/// Set of axes whose value changed during a location update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedAxes {
    bits: u8,
}

impl ChangedAxes {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, axis: Axis) {
        self.bits |= axis.bit();
    }

    pub fn contains(&self, axis: Axis) -> bool {
        self.bits & axis.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(|axis| self.contains(*axis))
    }
}

impl FromIterator<Axis> for ChangedAxes {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        let mut set = Self::empty();
        for axis in iter {
            set.insert(axis);
        }
        set
    }
}

impl Serialize for ChangedAxes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
