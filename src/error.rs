use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
