use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid volume extent 0 along axis {axis}")]
    ZeroSizedAxis { axis: &'static str },

    #[error("channel volumes differ in shape: {a:?} vs {b:?}")]
    ShapeMismatch { a: [usize; 3], b: [usize; 3] },
}
