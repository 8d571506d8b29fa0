use super::{
    grid::GridConfig, parameters::ParametersConfig, problem::ProblemConfig,
    storage::StorageConfig, traits::ConfigSection,
};
use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub parameters: ParametersConfig,
    pub problem: ProblemConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SweepError> {
        validate_section(&self.grid)?;
        validate_section(&self.parameters)?;
        validate_section(&self.problem)?;
        validate_section(&self.storage)?;
        Ok(())
    }
}

// Prefix configuration errors with the offending section
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), SweepError> {
    section.validate().map_err(|e| match e {
        SweepError::Configuration(msg) => {
            SweepError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Load a TOML file. Missing sections and fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SweepError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SweepError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SweepError> {
        let toml_str = toml::to_string_pretty(&self.config)?;

        std::fs::write(path, toml_str)
            .map_err(|e| SweepError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Apply an edit; it only sticks if the result still validates.
    pub fn update<F>(&mut self, f: F) -> Result<(), SweepError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
