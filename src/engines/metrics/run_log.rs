use crate::error::{Result, SweepError};
use crate::types::FitnessPoint;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-run log files are named `run_<n>.csv`
pub const RUN_LOG_PREFIX: &str = "run_";
pub const RUN_LOG_EXTENSION: &str = "csv";

pub const GENERATION_COLUMN: &str = "Generation";
pub const FITNESS_COLUMN: &str = "Fitness";

/// Fitness trajectory of a single run, as persisted on disk
#[derive(Debug, Clone, PartialEq)]
pub struct RunLog {
    pub points: Vec<FitnessPoint>,
}

impl RunLog {
    pub fn from_points(points: &[FitnessPoint]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn path_for(log_dir: &Path, run: usize) -> PathBuf {
        log_dir.join(format!("{}{}.{}", RUN_LOG_PREFIX, run, RUN_LOG_EXTENSION))
    }

    /// `run_12.csv` -> 12
    pub fn run_number(file_name: &str) -> Option<usize> {
        file_name
            .strip_prefix(RUN_LOG_PREFIX)?
            .strip_suffix(&format!(".{}", RUN_LOG_EXTENSION))?
            .parse()
            .ok()
    }

    pub fn generations(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.generation).collect()
    }

    pub fn fitness(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.fitness).collect()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df! {
            GENERATION_COLUMN => self.generations(),
            FITNESS_COLUMN => self.fitness(),
        }?;
        Ok(df)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = fs::File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        Self::from_dataframe(&df)
            .map_err(|e| SweepError::Aggregation(format!("{}: {}", path.display(), e)))
    }

    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let generations = df
            .column(GENERATION_COLUMN)
            .map_err(|_| SweepError::Aggregation(format!("missing '{}' column", GENERATION_COLUMN)))?
            .cast(&DataType::Int64)?;
        let fitness = df
            .column(FITNESS_COLUMN)
            .map_err(|_| SweepError::Aggregation(format!("missing '{}' column", FITNESS_COLUMN)))?
            .cast(&DataType::Float64)?;

        let points = generations
            .i64()?
            .into_iter()
            .zip(fitness.f64()?.into_iter())
            .enumerate()
            .map(|(row, pair)| match pair {
                (Some(g), Some(f)) if g >= 0 => Ok(FitnessPoint::new(g as u64, f)),
                _ => Err(SweepError::Aggregation(format!(
                    "invalid or empty cell at row {}",
                    row
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { points })
    }

    /// Run logs in `log_dir`, ordered by run number
    pub fn discover(log_dir: &Path) -> Result<Vec<(usize, PathBuf)>> {
        let mut logs = Vec::new();
        for entry in fs::read_dir(log_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(run) = file_name.to_str().and_then(Self::run_number) {
                logs.push((run, entry.path()));
            }
        }
        logs.sort_by_key(|(run, _)| *run);
        Ok(logs)
    }

    /// Remove leftovers of an interrupted attempt
    pub fn clear(log_dir: &Path) -> Result<usize> {
        if !log_dir.exists() {
            return Ok(0);
        }
        let stale = Self::discover(log_dir)?;
        for (_, path) in &stale {
            fs::remove_file(path)?;
        }
        Ok(stale.len())
    }
}
