use crate::types::Solution;

/// Sweep and run progress hooks. Every method defaults to a no-op.
pub trait ProgressCallback: Send {
    fn on_configuration_start(&mut self, _index: usize, _total: usize, _name: &str) {}

    fn on_configuration_skipped(&mut self, _name: &str) {}

    fn on_run_start(&mut self, _run: usize, _total_runs: usize) {}

    fn on_generation_complete(&mut self, _generation: u64, _best_fitness: f64) {}

    /// `overall_best` is the best solution seen so far across runs of the configuration
    fn on_run_complete(&mut self, _run: usize, _overall_best: &Solution) {}

    fn on_configuration_complete(&mut self, _name: &str) {}
}

/// Prints progress and the running overall best to stdout
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_configuration_start(&mut self, index: usize, total: usize, name: &str) {
        println!("[{}/{}] {}", index + 1, total, name);
    }

    fn on_configuration_skipped(&mut self, name: &str) {
        println!("{} already completed, skipping", name);
    }

    fn on_run_start(&mut self, run: usize, total_runs: usize) {
        println!("  Run {}/{}", run, total_runs);
    }

    fn on_run_complete(&mut self, _run: usize, overall_best: &Solution) {
        println!("  Best solution: {:?}", overall_best.representation);
        println!("  Best fitness (Sharpe ratio): {:.6}", overall_best.fitness);
        println!("  Expected return: {:.6}", overall_best.expected_return);
        println!("  Above risk free: {:.6}", overall_best.above_risk_free());
        println!("  Risk: {:.6}", overall_best.risk);
    }

    fn on_configuration_complete(&mut self, name: &str) {
        println!("{} complete", name);
    }
}

pub struct SilentProgress;

impl ProgressCallback for SilentProgress {}
