//! Expected returns and covariance of log-returns, derived once per sweep.

use crate::data::connectors::{PricePanel, PriceValidator};
use crate::error::{Result, SweepError};
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionVariables {
    pub products: Vec<String>,
    /// Sum of each product's log-returns over the whole window
    pub expected_returns: DVector<f64>,
    /// Sample covariance of the log-return columns (products x products)
    pub covariance: DMatrix<f64>,
    pub risk_free_return: f64,
}

impl DecisionVariables {
    pub fn from_prices(panel: &PricePanel, risk_free_return: f64) -> Result<Self> {
        PriceValidator::validate(panel)?;

        let returns = Self::log_returns(panel);
        let expected_returns = Self::expected_returns(&returns);
        let covariance = Self::sample_covariance(&returns)?;

        Ok(Self {
            products: panel.products.clone(),
            expected_returns,
            covariance,
            risk_free_return,
        })
    }

    /// Per-period log-returns, one row per period transition
    pub fn log_returns(panel: &PricePanel) -> DMatrix<f64> {
        let periods = panel.num_periods().saturating_sub(1);
        DMatrix::from_fn(periods, panel.num_products(), |i, j| {
            (panel.prices[i + 1][j] / panel.prices[i][j]).ln()
        })
    }

    pub fn expected_returns(returns: &DMatrix<f64>) -> DVector<f64> {
        DVector::from_iterator(returns.ncols(), returns.column_iter().map(|col| col.sum()))
    }

    /// Covariance with periods as observations, normalized by n - 1
    pub fn sample_covariance(returns: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let observations = returns.nrows();
        if observations < 2 {
            return Err(SweepError::Computation(format!(
                "Sample covariance needs at least 2 observations, got {}",
                observations
            )));
        }

        let means: Vec<f64> = returns.column_iter().map(|col| col.mean()).collect();
        let centered = DMatrix::from_fn(observations, returns.ncols(), |i, j| {
            returns[(i, j)] - means[j]
        });

        Ok(centered.transpose() * &centered / (observations - 1) as f64)
    }

    pub fn num_products(&self) -> usize {
        self.products.len()
    }
}
