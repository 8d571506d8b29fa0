//! Deterministic enumeration of the configuration grid.
//!
//! Dimensions nest in declaration order, outer to inner: initialization,
//! selection, crossover, mutation, replacement, crossover probability,
//! mutation probability. Tournament size is an extra innermost dimension that
//! only opens up under tournament selection; every other selection keeps the
//! base tournament size and yields a single point.

use super::configuration::Configuration;
use super::operators::SelectionKind;
use crate::config::GridConfig;

#[derive(Debug, Clone)]
pub struct ParameterGrid {
    base: Configuration,
    dimensions: GridConfig,
}

impl ParameterGrid {
    pub fn from_config(base: Configuration, dimensions: &GridConfig) -> Self {
        Self {
            base,
            dimensions: dimensions.clone(),
        }
    }

    /// Collect every grid point in enumeration order
    pub fn configurations(&self) -> Vec<Configuration> {
        self.iter().collect()
    }

    /// Every grid point, each an independent owned value
    pub fn iter(&self) -> impl Iterator<Item = Configuration> + '_ {
        let d = &self.dimensions;
        d.initialization.iter().flat_map(move |&init| {
            let point = self.base.with_initialization(init);
            d.selection.iter().flat_map(move |&selection| {
                let point = point.with_selection(selection);
                d.crossover.iter().flat_map(move |&crossover| {
                    let point = point.with_crossover(crossover);
                    d.mutation.iter().flat_map(move |&mutation| {
                        let point = point.with_mutation(mutation);
                        d.replacement.iter().flat_map(move |&replacement| {
                            let point = point.with_replacement(replacement);
                            d.crossover_probability.iter().flat_map(move |&cp| {
                                let point = point.with_crossover_probability(cp);
                                d.mutation_probability.iter().flat_map(move |&mp| {
                                    let point = point.with_mutation_probability(mp);
                                    self.pool_sizes(selection)
                                        .into_iter()
                                        .map(move |size| point.with_tournament_size(size))
                                })
                            })
                        })
                    })
                })
            })
        })
    }

    /// Number of grid points, without enumerating them
    pub fn total_combinations(&self) -> usize {
        let d = &self.dimensions;
        let shared = d.initialization.len()
            * d.crossover.len()
            * d.mutation.len()
            * d.replacement.len()
            * d.crossover_probability.len()
            * d.mutation_probability.len();

        let per_selection: usize = d
            .selection
            .iter()
            .map(|&selection| self.pool_sizes(selection).len())
            .sum();

        shared * per_selection
    }

    fn pool_sizes(&self, selection: SelectionKind) -> Vec<usize> {
        if selection == SelectionKind::Tournament {
            self.dimensions.tournament_sizes.clone()
        } else {
            vec![self.base.tournament_size]
        }
    }
}
