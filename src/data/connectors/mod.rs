mod csv;
mod types;
mod validator;

pub use csv::PriceConnector;
pub use types::{PanelMetadata, PricePanel};
pub use validator::{PriceValidator, MIN_PERIODS};
