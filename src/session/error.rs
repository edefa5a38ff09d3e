use crate::config::ConfigError;
use crate::model::ModelError;
use crate::runtime::RuntimeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session script parse failure: {0}")]
    Parse(String),

    #[error("session I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("session serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("session YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("viewer configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("volume construction failed: {0}")]
    Model(#[from] ModelError),

    #[error("workspace failure: {0}")]
    Runtime(#[from] RuntimeError),
}
