use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer configuration: {0}")]
    Invalid(String),

    #[error("configuration I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("configuration YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}
