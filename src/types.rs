use serde::{Deserialize, Serialize};

/// Allocation encoding: one entry per product slot, in precision units.
pub type Representation = Vec<u32>;

/// One row of a per-run fitness trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessPoint {
    pub generation: u64,
    pub fitness: f64,
}

impl FitnessPoint {
    pub fn new(generation: u64, fitness: f64) -> Self {
        Self { generation, fitness }
    }
}

/// Terminal result of one engine run.
///
/// Solutions are plain owned values. Whoever keeps one past the lifetime of
/// the engine that produced it keeps a clone, never a reference into engine
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub representation: Representation,
    pub fitness: f64,          // Sharpe-ratio-like objective
    pub expected_return: f64,
    pub risk: f64,
    pub risk_free: f64,
}

impl Solution {
    /// Expected return in excess of the risk-free reference
    pub fn above_risk_free(&self) -> f64 {
        self.expected_return - self.risk_free
    }
}
