pub mod aggregator;
pub mod record;
pub mod run_log;
pub mod statistics;

pub use aggregator::ResultAggregator;
pub use record::{BestSolutionSummary, ExperimentRecord, FitnessTable, RunColumn};
pub use run_log::RunLog;
pub use statistics::RowStatistics;
