use super::decision_variables::DecisionVariables;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub risk_tolerance: f64,
    pub budget: f64,
}

/// How an allocation is encoded for the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodingRule {
    pub size: usize,
    pub is_ordered: bool,
    pub can_repeat: bool,
    pub precision: f64,
}

impl EncodingRule {
    /// Number of allocation units per product (1 / precision)
    pub fn units(&self) -> u32 {
        (1.0 / self.precision).round() as u32
    }

    /// units ^ size, as a float since it overflows integers quickly
    pub fn search_space_size(&self) -> f64 {
        (self.units() as f64).powf(self.size as f64)
    }
}

/// Everything the engine needs to build a run, shared read-only across the sweep.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub decision_variables: Arc<DecisionVariables>,
    pub constraints: Constraints,
    pub encoding: EncodingRule,
}

impl ProblemInstance {
    pub fn new(
        decision_variables: Arc<DecisionVariables>,
        constraints: Constraints,
        encoding: EncodingRule,
    ) -> Self {
        Self {
            decision_variables,
            constraints,
            encoding,
        }
    }
}
