pub mod progress;
pub mod registry;
pub mod runner;
pub mod sweep;
pub mod tracker;

pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgress};
pub use registry::RunRegistry;
pub use runner::{ExperimentOutcome, ExperimentRunner};
pub use sweep::{prepare_problem, reaggregate_completed, run_grid, run_sweep, SweepSummary};
pub use tracker::BestSolutionTracker;
