use serde::{Deserialize, Serialize};

use crate::model::Channel;

/// Derived quantity rendered by a slice view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Fat channel only.
    #[default]
    RawChannelA,
    /// Water channel only.
    RawChannelB,
    /// Fat fraction, `A / (A + B)`.
    RatioA,
    /// Water fraction, `B / (A + B)`.
    RatioB,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::RawChannelA,
        DisplayMode::RawChannelB,
        DisplayMode::RatioA,
        DisplayMode::RatioB,
    ];

    /// Channels fetched for this mode. The first one is the numerator for
    /// ratio modes.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            Self::RawChannelA => &[Channel::A],
            Self::RawChannelB => &[Channel::B],
            Self::RatioA => &[Channel::A, Channel::B],
            Self::RatioB => &[Channel::B, Channel::A],
        }
    }

    pub fn is_ratio(self) -> bool {
        matches!(self, Self::RatioA | Self::RatioB)
    }
}

/// Value written where a ratio mode meets `0 / (0 + 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// Degenerate pixels become 0.0.
    #[default]
    Zero,
    /// Degenerate pixels keep the IEEE result (NaN).
    Propagate,
}
