use super::traits::ConfigSection;
use crate::engines::evaluation::problem::{Constraints, EncodingRule};
use crate::error::SweepError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    pub risk_tolerance: f64,
    pub budget: f64,
    pub risk_free_return: f64,
    pub portfolio_size: usize,
    pub precision: f64,
    pub is_ordered: bool,
    pub can_repeat: bool,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            risk_tolerance: 1.0,
            budget: 100_000.0,
            risk_free_return: 1.53, // US Treasury reference, 2020-01-08
            portfolio_size: 30,
            precision: 0.01,
            is_ordered: false,
            can_repeat: true,
        }
    }
}

impl ProblemConfig {
    pub fn constraints(&self) -> Constraints {
        Constraints {
            risk_tolerance: self.risk_tolerance,
            budget: self.budget,
        }
    }

    pub fn encoding_rule(&self) -> EncodingRule {
        EncodingRule {
            size: self.portfolio_size,
            is_ordered: self.is_ordered,
            can_repeat: self.can_repeat,
            precision: self.precision,
        }
    }
}

impl ConfigSection for ProblemConfig {
    fn section_name() -> &'static str {
        "problem"
    }

    fn validate(&self) -> Result<(), SweepError> {
        if self.portfolio_size == 0 {
            return Err(SweepError::Configuration(
                "Portfolio size must be at least 1".to_string(),
            ));
        }
        if self.precision <= 0.0 || self.precision > 1.0 {
            return Err(SweepError::Configuration(
                "Precision must be in (0, 1]".to_string(),
            ));
        }
        if self.budget <= 0.0 {
            return Err(SweepError::Configuration(
                "Budget must be positive".to_string(),
            ));
        }
        if self.risk_tolerance < 0.0 {
            return Err(SweepError::Configuration(
                "Risk tolerance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
