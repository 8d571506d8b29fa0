//! Sweep driver: load prices once, derive the problem once, then walk the grid.

use super::progress::ProgressCallback;
use super::registry::RunRegistry;
use super::runner::{ExperimentOutcome, ExperimentRunner};
use crate::config::{AppConfig, StorageConfig};
use crate::data::connectors::PriceConnector;
use crate::engines::evaluation::{DecisionVariables, ProblemInstance};
use crate::engines::generation::{EngineFactory, ParameterGrid};
use crate::engines::metrics::ResultAggregator;
use crate::error::Result;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub total: usize,
    pub completed: usize,
    pub skipped: usize,
}

/// Load the price table, keep the first `portfolio_size` products and derive
/// the shared problem instance.
pub fn prepare_problem(config: &AppConfig) -> Result<ProblemInstance> {
    let (panel, metadata) = PriceConnector::load_panel(&config.storage.prices_path)?;
    info!(
        "Loaded {} periods x {} products from {}",
        metadata.num_periods, metadata.num_products, metadata.file_path
    );

    let portfolio_size = config.problem.portfolio_size;
    let panel = panel.select_first(portfolio_size);
    if panel.num_products() < portfolio_size {
        warn!(
            "Portfolio size {} exceeds the {} available products",
            portfolio_size,
            panel.num_products()
        );
    }

    let decision_variables = DecisionVariables::from_prices(&panel, config.problem.risk_free_return)?;

    let mut encoding = config.problem.encoding_rule();
    encoding.size = decision_variables.num_products();
    info!(
        "Search space size: {:e} ({} units over {} products)",
        encoding.search_space_size(),
        encoding.units(),
        encoding.size
    );

    Ok(ProblemInstance::new(
        Arc::new(decision_variables),
        config.problem.constraints(),
        encoding,
    ))
}

/// Run every configuration of `grid` in enumeration order.
///
/// The first error aborts the sweep. Configurations finished before it keep
/// their artifacts and are skipped when the sweep is started again.
pub fn run_grid<F: EngineFactory>(
    factory: &F,
    problem: &ProblemInstance,
    grid: &ParameterGrid,
    storage: &StorageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<SweepSummary> {
    let registry = RunRegistry::new(&storage.results_dir);
    let runner = ExperimentRunner::new(
        factory,
        problem,
        registry,
        &storage.log_dir,
        storage.runs_per_configuration,
    );

    let total = grid.total_combinations();
    info!(
        "Starting sweep: {} configurations, {} runs each",
        total, storage.runs_per_configuration
    );

    let mut summary = SweepSummary {
        total,
        ..Default::default()
    };
    for (index, configuration) in grid.iter().enumerate() {
        progress.on_configuration_start(index, total, &configuration.canonical_name());
        match runner.run_configuration(&configuration, progress)? {
            ExperimentOutcome::Skipped { .. } => summary.skipped += 1,
            ExperimentOutcome::Completed(_) => summary.completed += 1,
        }
    }

    info!(
        "Sweep finished: {} completed, {} skipped",
        summary.completed, summary.skipped
    );
    Ok(summary)
}

pub fn run_sweep<F: EngineFactory>(
    config: &AppConfig,
    factory: &F,
    progress: &mut dyn ProgressCallback,
) -> Result<SweepSummary> {
    config.validate()?;

    let problem = prepare_problem(config)?;
    let grid = ParameterGrid::from_config(config.parameters.to_configuration(), &config.grid);
    run_grid(factory, &problem, &grid, &config.storage, progress)
}

/// Rebuild every completed artifact from the per-run logs still on disk,
/// keeping each artifact's best solution. Returns the number rewritten.
pub fn reaggregate_completed(storage: &StorageConfig) -> Result<usize> {
    let registry = RunRegistry::new(&storage.results_dir);
    let aggregator = ResultAggregator::new(storage.runs_per_configuration);

    let names = registry.completed()?;
    for name in &names {
        let record = registry.load(name)?;
        let rebuilt = aggregator.reaggregate(&record, &storage.log_dir.join(name))?;
        registry.record(&rebuilt)?;
        info!("Re-aggregated {}", name);
    }
    Ok(names.len())
}
