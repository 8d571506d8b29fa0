use super::record::{BestSolutionSummary, ExperimentRecord, FitnessTable, RunColumn};
use super::run_log::RunLog;
use super::statistics::RowStatistics;
use crate::error::{Result, SweepError};
use crate::types::Solution;
use log::{debug, warn};
use std::path::Path;

/// Folds the per-run logs of one configuration into a single record
pub struct ResultAggregator {
    expected_runs: usize,
}

impl ResultAggregator {
    pub fn new(expected_runs: usize) -> Self {
        Self { expected_runs }
    }

    pub fn expected_runs(&self) -> usize {
        self.expected_runs
    }

    /// Read every `run_<n>` log in `log_dir` and aggregate them
    pub fn aggregate(
        &self,
        name: &str,
        log_dir: &Path,
        best: &Solution,
    ) -> Result<ExperimentRecord> {
        let logs = Self::read_logs(log_dir)?;
        self.aggregate_logs(name, logs, best)
    }

    /// Aggregate logs already in memory, keyed by run label
    pub fn aggregate_logs(
        &self,
        name: &str,
        logs: Vec<(String, RunLog)>,
        best: &Solution,
    ) -> Result<ExperimentRecord> {
        Ok(ExperimentRecord {
            name: name.to_string(),
            fitness: self.aggregate_table(name, logs)?,
            overall_best_solution: BestSolutionSummary::from(best),
        })
    }

    /// Rebuild the fitness table of an existing record from its log directory
    pub fn reaggregate(&self, record: &ExperimentRecord, log_dir: &Path) -> Result<ExperimentRecord> {
        let logs = Self::read_logs(log_dir)?;
        Ok(ExperimentRecord {
            name: record.name.clone(),
            fitness: self.aggregate_table(&record.name, logs)?,
            overall_best_solution: record.overall_best_solution.clone(),
        })
    }

    /// Labelled run logs of `log_dir`, ordered by run number
    pub fn read_logs(log_dir: &Path) -> Result<Vec<(String, RunLog)>> {
        if !log_dir.is_dir() {
            return Err(SweepError::Aggregation(format!(
                "log directory {} does not exist",
                log_dir.display()
            )));
        }

        let mut logs = Vec::new();
        for (run, path) in RunLog::discover(log_dir)? {
            debug!("Reading run log {}", path.display());
            logs.push((format!("run_{}", run), RunLog::read(&path)?));
        }
        Ok(logs)
    }

    pub fn aggregate_table(&self, name: &str, logs: Vec<(String, RunLog)>) -> Result<FitnessTable> {
        if logs.len() != self.expected_runs {
            return Err(SweepError::Aggregation(format!(
                "{}: expected {} run logs, found {}",
                name,
                self.expected_runs,
                logs.len()
            )));
        }
        if logs.len() < 2 {
            return Err(SweepError::Aggregation(format!(
                "{}: at least 2 runs are needed for a sample standard deviation",
                name
            )));
        }

        let generation = logs[0].1.generations();
        if generation.is_empty() {
            return Err(SweepError::Aggregation(format!("{}: run logs are empty", name)));
        }
        for (label, log) in &logs[1..] {
            if log.generations() != generation {
                warn!("{}: {} does not share the generation index of {}", name, label, logs[0].0);
                return Err(SweepError::Aggregation(format!(
                    "{}: {} is misaligned with {}",
                    name, label, logs[0].0
                )));
            }
        }

        let runs: Vec<RunColumn> = logs
            .into_iter()
            .map(|(label, log)| RunColumn {
                name: label,
                fitness: log.fitness(),
            })
            .collect();

        let rows = generation.len();
        let mut sd = Vec::with_capacity(rows);
        let mut mean = Vec::with_capacity(rows);
        let mut lower = Vec::with_capacity(rows);
        let mut upper = Vec::with_capacity(rows);

        let mut row_values = Vec::with_capacity(runs.len());
        for row in 0..rows {
            row_values.clear();
            row_values.extend(runs.iter().map(|run| run.fitness[row]));
            let stats = RowStatistics::from_values(&row_values);
            // Zero-risk portfolios score ±inf or NaN; such rows are kept as is
            if !stats.sd.is_finite() || !stats.mean.is_finite() {
                warn!(
                    "{}: non-finite fitness statistics at generation {}",
                    name, generation[row]
                );
            }
            sd.push(stats.sd);
            mean.push(stats.mean);
            lower.push(stats.lower);
            upper.push(stats.upper);
        }

        Ok(FitnessTable {
            generation,
            runs,
            sd,
            mean,
            lower,
            upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FitnessPoint;

    fn log(values: &[f64]) -> RunLog {
        let points: Vec<FitnessPoint> = values
            .iter()
            .enumerate()
            .map(|(g, &f)| FitnessPoint::new(g as u64, f))
            .collect();
        RunLog::from_points(&points)
    }

    fn best() -> Solution {
        Solution {
            representation: vec![40, 60],
            fitness: 3.0,
            expected_return: 2.0,
            risk: 0.5,
            risk_free: 1.53,
        }
    }

    #[test]
    fn test_three_runs_three_generations() {
        let logs = vec![
            ("run_1".to_string(), log(&[1.0, 2.0, 3.0])),
            ("run_2".to_string(), log(&[2.0, 2.0, 2.0])),
            ("run_3".to_string(), log(&[3.0, 2.0, 1.0])),
        ];
        let record = ResultAggregator::new(3)
            .aggregate_logs("cfg", logs, &best())
            .unwrap();
        let table = &record.fitness;

        assert_eq!(table.generation, vec![0, 1, 2]);
        assert_eq!(table.runs.len(), 3);
        assert!((table.mean[0] - 2.0).abs() < 1e-12);
        assert!((table.sd[0] - 1.0).abs() < 1e-12);
        assert!((table.lower[0] - 0.868).abs() < 1e-3);
        assert!((table.upper[0] - 3.132).abs() < 1e-3);

        // Middle generation is identical across runs
        assert_eq!(table.sd[1], 0.0);
        assert_eq!(table.lower[1], table.upper[1]);

        assert_eq!(record.overall_best_solution.fitness, 3.0);
    }

    #[test]
    fn test_run_count_mismatch() {
        let logs = vec![
            ("run_1".to_string(), log(&[1.0])),
            ("run_2".to_string(), log(&[2.0])),
        ];
        let result = ResultAggregator::new(3).aggregate_logs("cfg", logs, &best());
        assert!(matches!(result, Err(SweepError::Aggregation(_))));
    }

    #[test]
    fn test_single_run_rejected() {
        let logs = vec![("run_1".to_string(), log(&[1.0, 2.0]))];
        let result = ResultAggregator::new(1).aggregate_logs("cfg", logs, &best());
        assert!(matches!(result, Err(SweepError::Aggregation(_))));
    }

    #[test]
    fn test_misaligned_generations() {
        let logs = vec![
            ("run_1".to_string(), log(&[1.0, 2.0, 3.0])),
            ("run_2".to_string(), log(&[1.0, 2.0])),
        ];
        let result = ResultAggregator::new(2).aggregate_logs("cfg", logs, &best());
        assert!(matches!(result, Err(SweepError::Aggregation(_))));
    }

    #[test]
    fn test_aggregate_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        log(&[1.0, 2.0]).write(&RunLog::path_for(dir.path(), 1)).unwrap();
        log(&[3.0, 4.0]).write(&RunLog::path_for(dir.path(), 2)).unwrap();

        let record = ResultAggregator::new(2)
            .aggregate("cfg", dir.path(), &best())
            .unwrap();
        assert_eq!(record.fitness.runs[0].name, "run_1");
        assert_eq!(record.fitness.runs[1].fitness, vec![3.0, 4.0]);
        assert!((record.fitness.mean[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reaggregate_keeps_best_solution() {
        let dir = tempfile::tempdir().unwrap();
        log(&[1.0, 2.0]).write(&RunLog::path_for(dir.path(), 1)).unwrap();
        log(&[3.0, 4.0]).write(&RunLog::path_for(dir.path(), 2)).unwrap();

        let aggregator = ResultAggregator::new(2);
        let original = aggregator.aggregate("cfg", dir.path(), &best()).unwrap();

        log(&[5.0, 6.0]).write(&RunLog::path_for(dir.path(), 2)).unwrap();
        let rebuilt = aggregator.reaggregate(&original, dir.path()).unwrap();
        assert_eq!(rebuilt.overall_best_solution, original.overall_best_solution);
        assert!((rebuilt.fitness.mean[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_fitness_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        log(&[f64::NEG_INFINITY, 1.0]).write(&RunLog::path_for(dir.path(), 1)).unwrap();
        log(&[0.5, 1.0]).write(&RunLog::path_for(dir.path(), 2)).unwrap();

        let record = ResultAggregator::new(2)
            .aggregate("zero_risk", dir.path(), &best())
            .unwrap();
        let table = &record.fitness;

        assert_eq!(table.runs[0].fitness[0], f64::NEG_INFINITY);
        assert!(!table.mean[0].is_finite());
        assert!(!table.sd[0].is_finite());
        assert_eq!(table.mean[1], 1.0);
        assert_eq!(table.sd[1], 0.0);

        let path = dir.path().join("zero_risk.json");
        record.save(&path).unwrap();
        let loaded = ExperimentRecord::load(&path).unwrap();
        assert_eq!(loaded.fitness.runs[0].fitness[0], f64::NEG_INFINITY);
        assert!(!loaded.fitness.mean[0].is_finite());
        assert_eq!(loaded.overall_best_solution, record.overall_best_solution);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = ResultAggregator::new(2).aggregate("cfg", &dir.path().join("nope"), &best());
        assert!(matches!(result, Err(SweepError::Aggregation(_))));
    }
}
