pub mod decision_variables;
pub mod problem;

pub use decision_variables::DecisionVariables;
pub use problem::{Constraints, EncodingRule, ProblemInstance};
