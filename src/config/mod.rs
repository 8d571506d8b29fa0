pub mod traits;
pub mod grid;
pub mod parameters;
pub mod problem;
pub mod storage;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use grid::GridConfig;
pub use parameters::ParametersConfig;
pub use problem::ProblemConfig;
pub use storage::StorageConfig;
pub use traits::ConfigSection;
