pub mod configuration;
pub mod engine;
pub mod grid;
pub mod operators;

pub use configuration::Configuration;
pub use engine::{EngineFactory, SearchEngine};
pub use grid::ParameterGrid;
pub use operators::{
    Crossover, CrossoverKind, Initialization, InitializationKind, Mutation, MutationKind,
    OperatorKind, Replacement, ReplacementKind, Scored, Selection, SelectionKind,
};
