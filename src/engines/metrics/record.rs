use crate::error::Result;
use crate::types::{Representation, Solution};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON has no literal for NaN or the infinities. Finite values stay plain
/// numbers; the rest are written as the strings `"NaN"`, `"inf"`, `"-inf"`.
mod json_float {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    fn to_repr(value: f64) -> Repr {
        if value.is_finite() {
            Repr::Number(value)
        } else {
            Repr::Text(value.to_string())
        }
    }

    fn from_repr<E: Error>(repr: Repr) -> Result<f64, E> {
        match repr {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse()
                .map_err(|_| E::custom(format!("invalid float '{}'", text))),
        }
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        to_repr(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        from_repr(Repr::deserialize(deserializer)?)
    }

    pub mod vec {
        use super::{from_repr, to_repr, Repr};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|v| to_repr(*v)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
            Vec::<Repr>::deserialize(deserializer)?
                .into_iter()
                .map(from_repr)
                .collect()
        }
    }
}

/// Fitness trajectory of one run inside the consolidated table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunColumn {
    pub name: String,
    #[serde(with = "json_float::vec")]
    pub fitness: Vec<f64>,
}

/// Generation-indexed cross-run statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessTable {
    #[serde(rename = "Generation")]
    pub generation: Vec<u64>,
    #[serde(rename = "Runs")]
    pub runs: Vec<RunColumn>,
    #[serde(rename = "Fitness_SD", with = "json_float::vec")]
    pub sd: Vec<f64>,
    #[serde(rename = "Fitness_Mean", with = "json_float::vec")]
    pub mean: Vec<f64>,
    #[serde(rename = "Fitness_Lower", with = "json_float::vec")]
    pub lower: Vec<f64>,
    #[serde(rename = "Fitness_Upper", with = "json_float::vec")]
    pub upper: Vec<f64>,
}

impl FitnessTable {
    pub fn num_generations(&self) -> usize {
        self.generation.len()
    }

    /// Columns: Generation, one per run, Fitness_SD, Fitness_Mean, Fitness_Lower, Fitness_Upper
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.runs.len() + 5);
        columns.push(Series::new("Generation".into(), self.generation.as_slice()).into());
        for run in &self.runs {
            columns.push(Series::new(run.name.as_str().into(), run.fitness.as_slice()).into());
        }
        columns.push(Series::new("Fitness_SD".into(), self.sd.as_slice()).into());
        columns.push(Series::new("Fitness_Mean".into(), self.mean.as_slice()).into());
        columns.push(Series::new("Fitness_Lower".into(), self.lower.as_slice()).into());
        columns.push(Series::new("Fitness_Upper".into(), self.upper.as_slice()).into());

        Ok(DataFrame::new(columns)?)
    }
}

/// One-row summary of the best solution found across all runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSolutionSummary {
    #[serde(rename = "Representation")]
    pub representation: Representation,
    #[serde(rename = "Fitness, Sharpe Ratio", with = "json_float")]
    pub fitness: f64,
    #[serde(rename = "Expected Return", with = "json_float")]
    pub expected_return: f64,
    #[serde(rename = "Risk", with = "json_float")]
    pub risk: f64,
    #[serde(rename = "Above Risk Free", with = "json_float")]
    pub above_risk_free: f64,
}

impl From<&Solution> for BestSolutionSummary {
    fn from(solution: &Solution) -> Self {
        Self {
            representation: solution.representation.clone(),
            fitness: solution.fitness,
            expected_return: solution.expected_return,
            risk: solution.risk,
            above_risk_free: solution.above_risk_free(),
        }
    }
}

/// Consolidated result of every run of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    #[serde(rename = "Configuration")]
    pub name: String,
    #[serde(rename = "Fitness")]
    pub fitness: FitnessTable,
    #[serde(rename = "Overall_Best_Solution")]
    pub overall_best_solution: BestSolutionSummary,
}

impl ExperimentRecord {
    /// Writes `<path>.tmp` and renames it over `path`; the final name only
    /// ever holds a complete artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
