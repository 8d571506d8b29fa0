use crate::error::{Result, SweepError};
use polars::prelude::*;
use std::path::Path;
use super::{
    types::{PanelMetadata, PricePanel},
    validator::PriceValidator,
};

pub struct PriceConnector;

impl PriceConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SweepError::DataLoading(format!(
                "Price table not found: {}",
                path.display()
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| {
                SweepError::DataLoading(format!("Failed to read CSV {}: {}", path.display(), e))
            })?;

        Ok(df)
    }

    /// Load the price table and turn it into a validated panel
    pub fn load_panel<P: AsRef<Path>>(path: P) -> Result<(PricePanel, PanelMetadata)> {
        let df = Self::load(&path)?;
        let (panel, skipped_columns) = Self::to_panel(&df)?;
        PriceValidator::validate(&panel)?;

        if !skipped_columns.is_empty() {
            log::warn!("Ignoring non-numeric columns: {:?}", skipped_columns);
        }

        let metadata = Self::create_metadata(&path, &panel, skipped_columns);
        Ok((panel, metadata))
    }

    /// Every numeric column is a product; anything else (dates, labels) is skipped.
    pub fn to_panel(df: &DataFrame) -> Result<(PricePanel, Vec<String>)> {
        let mut products = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut skipped = Vec::new();

        for column in df.get_columns() {
            let name = column.name().to_string();
            if !Self::is_numeric(column.dtype()) {
                skipped.push(name);
                continue;
            }

            let casted = column.cast(&DataType::Float64)?;
            let values = casted
                .f64()?
                .into_iter()
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| {
                    SweepError::DataLoading(format!("Column '{}' contains null prices", name))
                })?;

            products.push(name);
            columns.push(values);
        }

        let prices = (0..df.height())
            .map(|row| columns.iter().map(|col| col[row]).collect())
            .collect();

        Ok((PricePanel::new(products, prices), skipped))
    }

    pub fn create_metadata<P: AsRef<Path>>(
        path: P,
        panel: &PricePanel,
        skipped_columns: Vec<String>,
    ) -> PanelMetadata {
        let (min, max) = panel
            .prices
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));

        PanelMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_periods: panel.num_periods(),
            num_products: panel.num_products(),
            skipped_columns,
            price_range: if panel.prices.is_empty() { (0.0, 0.0) } else { (min, max) },
        }
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float64
                | DataType::Float32
                | DataType::Int64
                | DataType::Int32
                | DataType::UInt64
                | DataType::UInt32
        )
    }
}
