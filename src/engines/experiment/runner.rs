use super::progress::ProgressCallback;
use super::registry::RunRegistry;
use super::tracker::BestSolutionTracker;
use crate::engines::evaluation::ProblemInstance;
use crate::engines::generation::{Configuration, EngineFactory, SearchEngine};
use crate::engines::metrics::{ExperimentRecord, ResultAggregator, RunLog};
use crate::error::{Result, SweepError};
use crate::types::Solution;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentOutcome {
    /// An artifact already existed; nothing was run or written
    Skipped { name: String },
    Completed(ExperimentRecord),
}

/// Runs every repetition of a single configuration and consolidates the results
pub struct ExperimentRunner<'a, F: EngineFactory> {
    factory: &'a F,
    problem: &'a ProblemInstance,
    registry: RunRegistry,
    log_dir: PathBuf,
    runs: usize,
}

impl<'a, F: EngineFactory> ExperimentRunner<'a, F> {
    pub fn new(
        factory: &'a F,
        problem: &'a ProblemInstance,
        registry: RunRegistry,
        log_dir: impl Into<PathBuf>,
        runs: usize,
    ) -> Self {
        Self {
            factory,
            problem,
            registry,
            log_dir: log_dir.into(),
            runs,
        }
    }

    /// Per-run log directory of a configuration
    pub fn run_dir(&self, name: &str) -> PathBuf {
        self.log_dir.join(name)
    }

    pub fn run_configuration(
        &self,
        configuration: &Configuration,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExperimentOutcome> {
        let name = configuration.canonical_name();

        if self.registry.is_completed(&name) {
            info!("{} already completed, skipping", name);
            progress.on_configuration_skipped(&name);
            return Ok(ExperimentOutcome::Skipped { name });
        }

        let run_dir = self.run_dir(&name);
        fs::create_dir_all(&run_dir)?;
        self.registry.ensure_dir()?;

        let stale = RunLog::clear(&run_dir)?;
        if stale > 0 {
            warn!("Removed {} stale run logs from {}", stale, run_dir.display());
        }

        let mut tracker = BestSolutionTracker::new();
        for run in 1..=self.runs {
            progress.on_run_start(run, self.runs);
            let best = self.execute_run(configuration, run, &run_dir, progress)?;
            if tracker.offer(&best) {
                debug!("{} run {}: new best fitness {:.6}", name, run, best.fitness);
            }
            if let Some(overall) = tracker.best() {
                progress.on_run_complete(run, overall);
            }
        }

        let best = tracker.into_best().ok_or_else(|| {
            SweepError::Engine(format!("{}: no run produced a solution", name))
        })?;

        let record = ResultAggregator::new(self.runs).aggregate(&name, &run_dir, &best)?;
        let path = self.registry.record(&record)?;
        info!("Saved {} ({} runs) to {}", name, self.runs, path.display());
        progress.on_configuration_complete(&name);

        Ok(ExperimentOutcome::Completed(record))
    }

    fn execute_run(
        &self,
        configuration: &Configuration,
        run: usize,
        run_dir: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<Solution> {
        let mut engine = self.factory.build(self.problem, configuration, run)?;
        engine.search(progress)?;

        let log_path = engine.save_log(run_dir, run)?;
        debug!("Run {} log written to {}", run, log_path.display());

        engine.best_solution().cloned().ok_or_else(|| {
            SweepError::Engine(format!(
                "{} run {}: engine reported no best solution",
                configuration.canonical_name(),
                run
            ))
        })
    }
}
