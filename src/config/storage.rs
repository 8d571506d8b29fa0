use super::traits::ConfigSection;
use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where inputs are read from and results are written to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub prices_path: PathBuf,
    /// Per-run logs, one sub-directory per configuration name
    pub log_dir: PathBuf,
    /// Flat directory of consolidated artifacts
    pub results_dir: PathBuf,
    pub runs_per_configuration: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prices_path: PathBuf::from("data/sp_12_weeks.csv"),
            log_dir: PathBuf::from("log"),
            results_dir: PathBuf::from("log_all"),
            runs_per_configuration: 30,
        }
    }
}

impl ConfigSection for StorageConfig {
    fn section_name() -> &'static str {
        "storage"
    }

    fn validate(&self) -> Result<(), SweepError> {
        if self.runs_per_configuration < 2 {
            return Err(SweepError::Configuration(format!(
                "Runs per configuration must be at least 2, got {}",
                self.runs_per_configuration
            )));
        }
        if self.log_dir == self.results_dir {
            return Err(SweepError::Configuration(
                "Log directory and results directory must differ".to_string(),
            ));
        }
        Ok(())
    }
}
