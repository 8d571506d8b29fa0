//! Operator kinds a configuration can choose, and the capabilities an engine
//! drives them through.
//!
//! Each kind is a plain tagged value: equality and hashing are identity, and
//! `code()` is only used for presentation (canonical names, console output).

use crate::engines::evaluation::problem::EncodingRule;
use crate::types::Representation;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate paired with its fitness
pub type Scored = (Representation, f64);

pub trait OperatorKind: Copy + std::fmt::Debug {
    /// Short code used inside canonical configuration names
    fn code(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializationKind {
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    RouletteWheel,
    Tournament,
    Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    Pip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Swap,
    Insert,
    Inversion,
    Scramble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementKind {
    Elitism,
    Standard,
}

impl OperatorKind for InitializationKind {
    fn code(&self) -> &'static str {
        match self {
            Self::Random => "rand",
        }
    }
}

impl OperatorKind for SelectionKind {
    fn code(&self) -> &'static str {
        match self {
            Self::RouletteWheel => "rol",
            Self::Tournament => "tourn",
            Self::Rank => "rank",
        }
    }
}

impl OperatorKind for CrossoverKind {
    fn code(&self) -> &'static str {
        match self {
            Self::Pip => "cross",
        }
    }
}

impl OperatorKind for MutationKind {
    fn code(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Insert => "insert",
            Self::Inversion => "invert",
            Self::Scramble => "scramble",
        }
    }
}

impl OperatorKind for ReplacementKind {
    fn code(&self) -> &'static str {
        match self {
            Self::Elitism => "elit",
            Self::Standard => "std",
        }
    }
}

// Capabilities

pub trait Initialization {
    fn initialize<R: Rng>(&self, encoding: &EncodingRule, rng: &mut R) -> Representation;
}

pub trait Selection {
    /// Pick one parent. `None` only for an empty population.
    fn select<R: Rng>(
        &self,
        population: &[Scored],
        tournament_size: usize,
        rng: &mut R,
    ) -> Option<Representation>;

    fn select_parents<R: Rng>(
        &self,
        population: &[Scored],
        tournament_size: usize,
        rng: &mut R,
    ) -> Option<(Representation, Representation)> {
        let first = self.select(population, tournament_size, rng)?;
        let second = self.select(population, tournament_size, rng)?;
        Some((first, second))
    }
}

pub trait Crossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Representation,
        parent2: &Representation,
        rng: &mut R,
    ) -> (Representation, Representation);
}

pub trait Mutation {
    fn mutate<R: Rng>(&self, representation: &mut Representation, rng: &mut R);
}

pub trait Replacement {
    /// Build the next population from the current one and its offspring
    fn replace(&self, current: Vec<Scored>, offspring: Vec<Scored>) -> Vec<Scored>;
}

impl Initialization for InitializationKind {
    fn initialize<R: Rng>(&self, encoding: &EncodingRule, rng: &mut R) -> Representation {
        match self {
            Self::Random => random_representation(encoding, rng),
        }
    }
}

impl Selection for SelectionKind {
    fn select<R: Rng>(
        &self,
        population: &[Scored],
        tournament_size: usize,
        rng: &mut R,
    ) -> Option<Representation> {
        if population.is_empty() {
            return None;
        }
        let chosen = match self {
            Self::RouletteWheel => roulette_selection(population, rng),
            Self::Tournament => tournament_selection(population, tournament_size, rng),
            Self::Rank => rank_selection(population, rng),
        };
        Some(chosen)
    }
}

impl Crossover for CrossoverKind {
    fn crossover<R: Rng>(
        &self,
        parent1: &Representation,
        parent2: &Representation,
        rng: &mut R,
    ) -> (Representation, Representation) {
        match self {
            Self::Pip => portfolio_crossover(parent1, parent2, rng),
        }
    }
}

impl Mutation for MutationKind {
    fn mutate<R: Rng>(&self, representation: &mut Representation, rng: &mut R) {
        let Some((i, j)) = two_positions(representation.len(), rng) else {
            return;
        };
        match self {
            Self::Swap => representation.swap(i, j),
            Self::Insert => {
                let gene = representation.remove(j);
                representation.insert(i + 1, gene);
            }
            Self::Inversion => representation[i..=j].reverse(),
            Self::Scramble => representation[i..=j].shuffle(rng),
        }
    }
}

impl Replacement for ReplacementKind {
    fn replace(&self, current: Vec<Scored>, mut offspring: Vec<Scored>) -> Vec<Scored> {
        match self {
            Self::Standard => offspring,
            Self::Elitism => {
                let best_current = current
                    .into_iter()
                    .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
                let worst_offspring = offspring
                    .iter()
                    .enumerate()
                    .min_by(|a, b| a.1 .1.partial_cmp(&b.1 .1).unwrap_or(Ordering::Equal))
                    .map(|(idx, _)| idx);
                let best_offspring_fitness = offspring
                    .iter()
                    .map(|(_, f)| *f)
                    .fold(f64::NEG_INFINITY, f64::max);

                if let (Some(elite), Some(worst)) = (best_current, worst_offspring) {
                    if elite.1 > best_offspring_fitness {
                        offspring[worst] = elite;
                    }
                }
                offspring
            }
        }
    }
}

fn by_fitness(a: &Scored, b: &Scored) -> Ordering {
    a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)
}

/// Best of `tournament_size` distinct candidates drawn without replacement
fn tournament_selection<R: Rng>(
    population: &[Scored],
    tournament_size: usize,
    rng: &mut R,
) -> Representation {
    let amount = tournament_size.clamp(1, population.len());
    index::sample(rng, population.len(), amount)
        .into_iter()
        .map(|idx| &population[idx])
        .max_by(|a, b| by_fitness(a, b))
        .map_or_else(|| population[0].0.clone(), |(representation, _)| representation.clone())
}

/// Fitness-proportional pick on fitness shifted by the population minimum.
///
/// Sharpe ratios are frequently negative, so the worst candidate gets weight
/// zero and everyone else weighs their distance above it. A flat or
/// non-finite population falls back to a uniform pick.
fn roulette_selection<R: Rng>(population: &[Scored], rng: &mut R) -> Representation {
    let floor = population
        .iter()
        .map(|(_, f)| *f)
        .fold(f64::INFINITY, f64::min);
    let weights = population.iter().map(|(_, f)| f - floor);

    match WeightedIndex::<f64>::new(weights) {
        Ok(wheel) => population[wheel.sample(rng)].0.clone(),
        Err(_) => population[rng.gen_range(0..population.len())].0.clone(),
    }
}

/// Pick with probability proportional to fitness rank (worst = 1)
fn rank_selection<R: Rng>(population: &[Scored], rng: &mut R) -> Representation {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| by_fitness(&population[a], &population[b]));

    match WeightedIndex::<usize>::new(1..=order.len()) {
        Ok(ranks) => population[order[ranks.sample(rng)]].0.clone(),
        Err(_) => population[rng.gen_range(0..population.len())].0.clone(),
    }
}

/// Portfolio crossover: both children blend the parents' allocations with one
/// random share `alpha`, per product, rounded to whole units.
///
/// Child two takes whatever child one left, so for every product the pair
/// holds exactly the units the parents held, and each gene stays between the
/// two parent values (inside the encoding's unit range).
fn portfolio_crossover<R: Rng>(
    parent1: &Representation,
    parent2: &Representation,
    rng: &mut R,
) -> (Representation, Representation) {
    let alpha: f64 = rng.gen();
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| {
            let blended = (alpha * a as f64 + (1.0 - alpha) * b as f64).round() as u32;
            (blended, a + b - blended)
        })
        .unzip()
}

/// Random allocation honoring the encoding's repeat and order flags
pub fn random_representation<R: Rng>(encoding: &EncodingRule, rng: &mut R) -> Representation {
    let units = encoding.units();
    let pool_size = units as usize + 1;

    // Without repeats the value pool must cover every slot
    let mut representation: Representation = if encoding.can_repeat || pool_size < encoding.size {
        (0..encoding.size).map(|_| rng.gen_range(0..=units)).collect()
    } else {
        let pool: Vec<u32> = (0..=units).collect();
        pool.choose_multiple(rng, encoding.size).copied().collect()
    };

    if encoding.is_ordered {
        representation.sort_unstable();
    }
    representation
}

/// Two distinct positions, ordered, or `None` when fewer than two exist
fn two_positions<R: Rng>(len: usize, rng: &mut R) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    let a = rng.gen_range(0..len);
    let mut b = rng.gen_range(0..len - 1);
    if b >= a {
        b += 1;
    }
    Some((a.min(b), a.max(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population() -> Vec<Scored> {
        vec![
            (vec![1, 1, 1], 0.5),
            (vec![2, 2, 2], 3.0),
            (vec![3, 3, 3], 1.0),
        ]
    }

    #[test]
    fn test_codes() {
        assert_eq!(InitializationKind::Random.code(), "rand");
        assert_eq!(SelectionKind::RouletteWheel.code(), "rol");
        assert_eq!(SelectionKind::Tournament.code(), "tourn");
        assert_eq!(SelectionKind::Rank.code(), "rank");
        assert_eq!(CrossoverKind::Pip.code(), "cross");
        assert_eq!(MutationKind::Inversion.code(), "invert");
        assert_eq!(ReplacementKind::Standard.code(), "std");
    }

    #[test]
    fn test_selection_on_empty_population() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in [SelectionKind::RouletteWheel, SelectionKind::Tournament, SelectionKind::Rank] {
            assert!(kind.select(&[], 3, &mut rng).is_none());
        }
    }

    #[test]
    fn test_selection_returns_population_member() {
        let mut rng = StdRng::seed_from_u64(7);
        let pop = population();
        for kind in [SelectionKind::RouletteWheel, SelectionKind::Tournament, SelectionKind::Rank] {
            for _ in 0..50 {
                let (a, b) = kind.select_parents(&pop, 2, &mut rng).unwrap();
                assert!(pop.iter().any(|(r, _)| *r == a));
                assert!(pop.iter().any(|(r, _)| *r == b));
            }
        }
    }

    #[test]
    fn test_roulette_skips_zero_fitness() {
        let mut rng = StdRng::seed_from_u64(3);
        let pop = vec![(vec![0], 0.0), (vec![1], 5.0), (vec![2], 0.0)];
        for _ in 0..100 {
            assert_eq!(roulette_selection(&pop, &mut rng), vec![1]);
        }
    }

    #[test]
    fn test_rank_prefers_better() {
        let mut rng = StdRng::seed_from_u64(11);
        let pop = vec![(vec![0], -1.0), (vec![1], 10.0)];
        let best_count = (0..3000)
            .filter(|_| rank_selection(&pop, &mut rng) == vec![1])
            .count();
        assert!(best_count > 1500);
    }

    #[test]
    fn test_roulette_handles_negative_sharpe() {
        let mut rng = StdRng::seed_from_u64(3);
        let pop = vec![(vec![0], -3.0), (vec![1], -1.0)];
        for _ in 0..100 {
            assert_eq!(roulette_selection(&pop, &mut rng), vec![1]);
        }
    }

    #[test]
    fn test_roulette_flat_or_non_finite_population() {
        let mut rng = StdRng::seed_from_u64(8);
        let flat = vec![(vec![0], 1.0), (vec![1], 1.0)];
        let broken = vec![(vec![0], f64::NEG_INFINITY), (vec![1], 1.0)];
        for _ in 0..20 {
            assert!(roulette_selection(&flat, &mut rng)[0] <= 1);
            assert!(roulette_selection(&broken, &mut rng)[0] <= 1);
        }
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let mut rng = StdRng::seed_from_u64(12);
        let pop = population();
        for _ in 0..20 {
            assert_eq!(tournament_selection(&pop, 3, &mut rng), vec![2, 2, 2]);
            assert_eq!(tournament_selection(&pop, 50, &mut rng), vec![2, 2, 2]);
        }
    }

    #[test]
    fn test_portfolio_crossover_conserves_units() {
        let mut rng = StdRng::seed_from_u64(5);
        let p1: Representation = vec![0, 10, 40, 100, 7];
        let p2: Representation = vec![100, 10, 0, 50, 3];
        for _ in 0..50 {
            let (c1, c2) = CrossoverKind::Pip.crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 5);
            assert_eq!(c2.len(), 5);
            for i in 0..5 {
                assert_eq!(c1[i] + c2[i], p1[i] + p2[i]);
                assert!(c1[i] >= p1[i].min(p2[i]) && c1[i] <= p1[i].max(p2[i]));
            }
            assert_eq!(c1[1], 10);
        }
    }

    #[test]
    fn test_mutations_preserve_genes() {
        let mut rng = StdRng::seed_from_u64(9);
        for kind in [
            MutationKind::Swap,
            MutationKind::Insert,
            MutationKind::Inversion,
            MutationKind::Scramble,
        ] {
            let original: Representation = (0..10).collect();
            let mut mutated = original.clone();
            kind.mutate(&mut mutated, &mut rng);
            let mut sorted = mutated.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original, "{:?} lost or duplicated genes", kind);
        }
    }

    #[test]
    fn test_swap_changes_two_positions() {
        let mut rng = StdRng::seed_from_u64(2);
        let original: Representation = (0..8).collect();
        let mut mutated = original.clone();
        MutationKind::Swap.mutate(&mut mutated, &mut rng);
        let changed = original.iter().zip(&mutated).filter(|(a, b)| a != b).count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_mutation_on_single_gene_is_noop() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut single = vec![42];
        MutationKind::Scramble.mutate(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_elitism_keeps_best_parent() {
        let current = population();
        let offspring = vec![(vec![9], 1.5), (vec![8], 0.1), (vec![7], 2.0)];
        let next = ReplacementKind::Elitism.replace(current, offspring);
        assert_eq!(next.len(), 3);
        assert!(next.iter().any(|(r, f)| *r == vec![2, 2, 2] && *f == 3.0));
        assert!(!next.iter().any(|(r, _)| *r == vec![8]));
    }

    #[test]
    fn test_elitism_without_better_parent() {
        let current = vec![(vec![1], 0.5)];
        let offspring = vec![(vec![9], 1.5), (vec![8], 0.1)];
        let next = ReplacementKind::Elitism.replace(current, offspring.clone());
        assert_eq!(next, offspring);
    }

    #[test]
    fn test_standard_replacement() {
        let offspring = vec![(vec![9], 0.0)];
        let next = ReplacementKind::Standard.replace(population(), offspring.clone());
        assert_eq!(next, offspring);
    }

    #[test]
    fn test_random_representation_respects_encoding() {
        let mut rng = StdRng::seed_from_u64(4);
        let rule = EncodingRule {
            size: 10,
            is_ordered: true,
            can_repeat: false,
            precision: 0.01,
        };
        let rep = InitializationKind::Random.initialize(&rule, &mut rng);
        assert_eq!(rep.len(), 10);
        assert!(rep.iter().all(|&g| g <= 100));
        assert!(rep.windows(2).all(|w| w[0] < w[1]));
    }
}
