use super::traits::{validate_probability, ConfigSection};
use crate::engines::generation::operators::{
    CrossoverKind, InitializationKind, MutationKind, ReplacementKind, SelectionKind,
};
use crate::error::SweepError;
use serde::{Deserialize, Serialize};

/// Values to sweep for every grid dimension.
///
/// `tournament_sizes` is only iterated for grid points whose selection is
/// tournament selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub initialization: Vec<InitializationKind>,
    pub selection: Vec<SelectionKind>,
    pub crossover: Vec<CrossoverKind>,
    pub mutation: Vec<MutationKind>,
    pub replacement: Vec<ReplacementKind>,
    pub crossover_probability: Vec<f64>,
    pub mutation_probability: Vec<f64>,
    pub tournament_sizes: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initialization: vec![InitializationKind::Random],
            selection: vec![SelectionKind::RouletteWheel],
            crossover: vec![CrossoverKind::Pip],
            mutation: vec![
                MutationKind::Swap,
                MutationKind::Insert,
                MutationKind::Inversion,
                MutationKind::Scramble,
            ],
            replacement: vec![ReplacementKind::Elitism],
            crossover_probability: vec![0.1],
            mutation_probability: vec![0.9],
            tournament_sizes: vec![2, 5, 10],
        }
    }
}

impl ConfigSection for GridConfig {
    fn section_name() -> &'static str {
        "grid"
    }

    fn validate(&self) -> Result<(), SweepError> {
        let dimensions = [
            ("initialization", self.initialization.len()),
            ("selection", self.selection.len()),
            ("crossover", self.crossover.len()),
            ("mutation", self.mutation.len()),
            ("replacement", self.replacement.len()),
            ("crossover_probability", self.crossover_probability.len()),
            ("mutation_probability", self.mutation_probability.len()),
        ];
        for (name, len) in dimensions {
            if len == 0 {
                return Err(SweepError::Configuration(format!(
                    "Grid dimension '{}' must list at least one value",
                    name
                )));
            }
        }

        if self.selection.contains(&SelectionKind::Tournament) && self.tournament_sizes.is_empty() {
            return Err(SweepError::Configuration(
                "Tournament selection is swept but no tournament sizes are listed".to_string(),
            ));
        }
        if self.tournament_sizes.contains(&0) {
            return Err(SweepError::Configuration(
                "Tournament sizes must be at least 1".to_string(),
            ));
        }

        for &p in &self.crossover_probability {
            validate_probability("Crossover probability", p)?;
        }
        for &p in &self.mutation_probability {
            validate_probability("Mutation probability", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_dimension_rejected() {
        let grid = GridConfig {
            mutation: vec![],
            ..Default::default()
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_tournament_without_sizes_rejected() {
        let grid = GridConfig {
            selection: vec![SelectionKind::Tournament],
            tournament_sizes: vec![],
            ..Default::default()
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_sizes_ignored_without_tournament() {
        let grid = GridConfig {
            selection: vec![SelectionKind::Rank],
            tournament_sizes: vec![],
            ..Default::default()
        };
        assert!(grid.validate().is_ok());
    }
}
