use crate::error::{Result, SweepError};
use super::types::PricePanel;

/// Two log-return observations are needed for a sample covariance.
pub const MIN_PERIODS: usize = 3;

pub struct PriceValidator;

impl PriceValidator {
    /// Validate that the panel can feed the decision-variable derivation
    pub fn validate(panel: &PricePanel) -> Result<()> {
        if panel.num_products() == 0 {
            return Err(SweepError::DataLoading(
                "Price table has no numeric product columns".to_string(),
            ));
        }

        Self::validate_minimum_periods(panel, MIN_PERIODS)?;

        for (period, row) in panel.prices.iter().enumerate() {
            if row.len() != panel.num_products() {
                return Err(SweepError::DataLoading(format!(
                    "Period {} has {} prices, expected {}",
                    period,
                    row.len(),
                    panel.num_products()
                )));
            }
            for (product, &price) in panel.products.iter().zip(row) {
                if !price.is_finite() || price <= 0.0 {
                    return Err(SweepError::DataLoading(format!(
                        "Invalid price {} for '{}' at period {}",
                        price, product, period
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn validate_minimum_periods(panel: &PricePanel, min_periods: usize) -> Result<()> {
        if panel.num_periods() < min_periods {
            return Err(SweepError::DataLoading(format!(
                "Price table has {} periods, at least {} required",
                panel.num_periods(),
                min_periods
            )));
        }
        Ok(())
    }
}
