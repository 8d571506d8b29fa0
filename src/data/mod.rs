pub mod connectors;

pub use connectors::{PanelMetadata, PriceConnector, PricePanel, PriceValidator};
