use super::operators::{
    CrossoverKind, InitializationKind, MutationKind, OperatorKind, ReplacementKind,
    SelectionKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One grid point: the hyperparameters and operators handed to the engine.
///
/// Values are immutable in practice; the grid builds each point with the
/// `with_*` methods, which return updated copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
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

impl Configuration {
    pub fn with_initialization(&self, initialization: InitializationKind) -> Self {
        Self { initialization, ..self.clone() }
    }

    pub fn with_selection(&self, selection: SelectionKind) -> Self {
        Self { selection, ..self.clone() }
    }

    pub fn with_crossover(&self, crossover: CrossoverKind) -> Self {
        Self { crossover, ..self.clone() }
    }

    pub fn with_mutation(&self, mutation: MutationKind) -> Self {
        Self { mutation, ..self.clone() }
    }

    pub fn with_replacement(&self, replacement: ReplacementKind) -> Self {
        Self { replacement, ..self.clone() }
    }

    pub fn with_crossover_probability(&self, crossover_probability: f64) -> Self {
        Self { crossover_probability, ..self.clone() }
    }

    pub fn with_mutation_probability(&self, mutation_probability: f64) -> Self {
        Self { mutation_probability, ..self.clone() }
    }

    pub fn with_tournament_size(&self, tournament_size: usize) -> Self {
        Self { tournament_size, ..self.clone() }
    }

    /// Label and deduplication key, e.g.
    /// `I-rand_S-rol_C-cross_M-swap_R-elit_CP-0.1_MP-0.9_PS-40_TS-5_G-1000`.
    pub fn canonical_name(&self) -> String {
        format!(
            "I-{}_S-{}_C-{}_M-{}_R-{}_CP-{}_MP-{}_PS-{}_TS-{}_G-{}",
            self.initialization.code(),
            self.selection.code(),
            self.crossover.code(),
            self.mutation.code(),
            self.replacement.code(),
            format_probability(self.crossover_probability),
            format_probability(self.mutation_probability),
            self.population_size,
            self.tournament_size,
            self.generations,
        )
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

// Debug formatting keeps the trailing `.0` on whole numbers (1.0, not 1)
fn format_probability(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParametersConfig;

    fn base() -> Configuration {
        ParametersConfig::default().to_configuration()
    }

    #[test]
    fn test_canonical_name_format() {
        let config = base()
            .with_crossover_probability(0.1)
            .with_mutation_probability(0.9);
        assert_eq!(
            config.canonical_name(),
            "I-rand_S-rol_C-cross_M-swap_R-elit_CP-0.1_MP-0.9_PS-40_TS-5_G-1000"
        );
    }

    #[test]
    fn test_whole_probability_keeps_decimal() {
        let config = base().with_crossover_probability(1.0).with_mutation_probability(0.0);
        assert!(config.canonical_name().contains("_CP-1.0_MP-0.0_"));
    }

    #[test]
    fn test_canonical_name_is_deterministic() {
        let a = base().with_selection(SelectionKind::Tournament).with_tournament_size(10);
        let b = base().with_selection(SelectionKind::Tournament).with_tournament_size(10);
        assert_eq!(a, b);
        assert_eq!(a.canonical_name(), b.canonical_name());
        assert_eq!(a.canonical_name(), a.canonical_name());
    }

    #[test]
    fn test_distinct_configurations_get_distinct_names() {
        let a = base().with_mutation(MutationKind::Insert);
        let b = base().with_mutation(MutationKind::Inversion);
        assert_ne!(a.canonical_name(), b.canonical_name());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let original = base();
        let updated = original.with_replacement(ReplacementKind::Standard);
        assert_eq!(original.replacement, ReplacementKind::Elitism);
        assert_eq!(updated.replacement, ReplacementKind::Standard);
    }
}
