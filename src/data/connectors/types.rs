use serde::{Deserialize, Serialize};

/// Closing prices, rows = periods, columns = products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePanel {
    pub products: Vec<String>,
    pub prices: Vec<Vec<f64>>,
}

impl PricePanel {
    pub fn new(products: Vec<String>, prices: Vec<Vec<f64>>) -> Self {
        Self { products, prices }
    }

    pub fn num_periods(&self) -> usize {
        self.prices.len()
    }

    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    /// Keep only the first `count` products (all of them if fewer exist)
    pub fn select_first(&self, count: usize) -> PricePanel {
        let keep = count.min(self.num_products());
        PricePanel {
            products: self.products[..keep].to_vec(),
            prices: self
                .prices
                .iter()
                .map(|row| row[..keep.min(row.len())].to_vec())
                .collect(),
        }
    }
}

/// Summary of a loaded price table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelMetadata {
    pub file_path: String,
    pub num_periods: usize,
    pub num_products: usize,
    pub skipped_columns: Vec<String>,
    pub price_range: (f64, f64), // (min, max)
}
