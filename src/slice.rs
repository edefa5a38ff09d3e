mod derive;
mod error;
mod mode;
mod normalize;


pub use derive::{ImageStats, NormalizedImage, derive_slice};
pub use error::{Result, SliceError};
pub use mode::{DisplayMode, RatioPolicy};
pub use normalize::{normalize_min_max, ratio};
