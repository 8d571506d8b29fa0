//! Hyperparameter sweep harness for portfolio-allocation search.
//!
//! Enumerates a grid of operator and probability settings, runs an external
//! search engine several times per setting and consolidates each setting's
//! runs into a single resumable artifact.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AppConfig, ConfigManager};
pub use engines::experiment::{
    run_sweep, ConsoleProgressCallback, ProgressCallback, SilentProgress, SweepSummary,
};
pub use engines::generation::{Configuration, EngineFactory, ParameterGrid, SearchEngine};
pub use error::{Result, SweepError};
pub use types::{FitnessPoint, Representation, Solution};
