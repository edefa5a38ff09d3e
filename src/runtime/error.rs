use crate::model::ModelError;
use crate::slice::SliceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("no volumes loaded")]
    NotLoaded,

    #[error("no stroke in progress")]
    NoStroke,

    #[error("volume error: {0}")]
    Model(#[from] ModelError),

    #[error("slice error: {0}")]
    Slice(#[from] SliceError),
}
