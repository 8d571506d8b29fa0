use crate::error::SweepError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), SweepError>;
}

/// Shared check for values that must be probabilities
pub(crate) fn validate_probability(name: &str, value: f64) -> Result<(), SweepError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SweepError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
