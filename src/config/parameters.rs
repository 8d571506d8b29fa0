use super::traits::{validate_probability, ConfigSection};
use crate::engines::generation::configuration::Configuration;
use crate::engines::generation::operators::{
    CrossoverKind, InitializationKind, MutationKind, ReplacementKind, SelectionKind,
};
use crate::error::SweepError;
use serde::{Deserialize, Serialize};

/// Base hyperparameters. Grid dimensions override these per grid point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParametersConfig {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub tournament_size: usize,
    pub initialization: InitializationKind,
    pub selection: SelectionKind,
    pub crossover: CrossoverKind,
    pub mutation: MutationKind,
    pub replacement: ReplacementKind,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 1000,
            crossover_probability: 0.8,
            mutation_probability: 0.8,
            tournament_size: 5,
            initialization: InitializationKind::Random,
            selection: SelectionKind::RouletteWheel,
            crossover: CrossoverKind::Pip,
            mutation: MutationKind::Swap,
            replacement: ReplacementKind::Elitism,
        }
    }
}

impl ParametersConfig {
    pub fn to_configuration(&self) -> Configuration {
        Configuration {
            population_size: self.population_size,
            generations: self.generations,
            crossover_probability: self.crossover_probability,
            mutation_probability: self.mutation_probability,
            tournament_size: self.tournament_size,
            initialization: self.initialization,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            replacement: self.replacement,
        }
    }
}

impl ConfigSection for ParametersConfig {
    fn section_name() -> &'static str {
        "parameters"
    }

    fn validate(&self) -> Result<(), SweepError> {
        if self.population_size < 2 {
            return Err(SweepError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(SweepError::Configuration(
                "Number of generations must be at least 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(SweepError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        validate_probability("Crossover probability", self.crossover_probability)?;
        validate_probability("Mutation probability", self.mutation_probability)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ParametersConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = ParametersConfig {
            mutation_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SweepError::Configuration(_))));
    }

    #[test]
    fn test_to_configuration_copies_fields() {
        let config = ParametersConfig::default();
        let configuration = config.to_configuration();
        assert_eq!(configuration.population_size, 40);
        assert_eq!(configuration.generations, 1000);
        assert_eq!(configuration.selection, SelectionKind::RouletteWheel);
    }
}
