use crate::model::Channel;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SliceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    #[error("no slice data for channel {channel:?} at depth {depth}")]
    Empty { channel: Channel, depth: usize },

    #[error("unsupported slice layout: {0}")]
    UnsupportedLayout(String),
}
