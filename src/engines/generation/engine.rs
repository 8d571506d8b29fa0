//! Contract between the sweep and the external search engine.
//!
//! The sweep never drives the search loop itself. For every run it asks an
//! [`EngineFactory`] for a fresh engine, lets it search, then collects the
//! terminal best solution and the per-generation fitness log.

use super::configuration::Configuration;
use crate::engines::evaluation::ProblemInstance;
use crate::engines::experiment::progress::ProgressCallback;
use crate::engines::metrics::RunLog;
use crate::error::Result;
use crate::types::{FitnessPoint, Solution};
use std::path::{Path, PathBuf};

pub trait SearchEngine {
    /// Run the search to completion. Any error aborts the sweep.
    fn search(&mut self, progress: &mut dyn ProgressCallback) -> Result<()>;

    /// Terminal best solution, available once `search` returned
    fn best_solution(&self) -> Option<&Solution>;

    /// Best fitness per generation, in generation order
    fn generation_log(&self) -> &[FitnessPoint];

    /// Persist the generation log as `run_<run>.csv` under `log_dir`
    fn save_log(&self, log_dir: &Path, run: usize) -> Result<PathBuf> {
        let path = RunLog::path_for(log_dir, run);
        RunLog::from_points(self.generation_log()).write(&path)?;
        Ok(path)
    }
}

pub trait EngineFactory {
    type Engine: SearchEngine;

    /// Build a fresh engine for one run. `run` is 1-based.
    fn build(
        &self,
        problem: &ProblemInstance,
        configuration: &Configuration,
        run: usize,
    ) -> Result<Self::Engine>;
}
