mod axis;
mod error;
mod location;
mod phantom;
mod volume;


pub use axis::{Axis, ChangedAxes};
pub use error::{ModelError, Result};
pub use location::{Extents, Location4, LocationModel, LocationUpdate};
pub use phantom::phantom;
pub use volume::{Channel, Volume, VolumePair, VolumeProvider};
