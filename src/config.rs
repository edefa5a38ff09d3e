mod error;
mod io;
mod viewer;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, Result};
pub use io::{load_config, save_config};
pub(crate) use io::is_yaml;
pub use viewer::ViewerConfig;
