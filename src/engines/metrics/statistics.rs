use statrs::statistics::Statistics;

/// z-score of a two-sided 95% normal interval
pub const Z_95: f64 = 1.96;

/// Cross-run statistics for one generation row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStatistics {
    pub mean: f64,
    pub sd: f64,
    pub lower: f64,
    pub upper: f64,
}

impl RowStatistics {
    /// Mean, sample SD (n - 1) and mean ± 1.96·SD/√n
    pub fn from_values(values: &[f64]) -> Self {
        let mean = values.iter().mean();
        let sd = values.iter().std_dev();
        let half_width = Self::half_width(sd, values.len());

        Self {
            mean,
            sd,
            lower: mean - half_width,
            upper: mean + half_width,
        }
    }

    pub fn half_width(sd: f64, n: usize) -> f64 {
        Z_95 * sd / (n as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_runs_one_generation() {
        let stats = RowStatistics::from_values(&[1.0, 2.0, 3.0]);
        let half_width = 1.96 / 3f64.sqrt();

        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.sd - 1.0).abs() < 1e-12);
        assert!((half_width - 1.1316).abs() < 1e-3);
        assert!((stats.lower - (2.0 - half_width)).abs() < 1e-12);
        assert!((stats.upper - (2.0 + half_width)).abs() < 1e-12);
        assert!((stats.lower - 0.868).abs() < 1e-3);
        assert!((stats.upper - 3.132).abs() < 1e-3);
    }

    #[test]
    fn test_identical_values_have_zero_width() {
        let stats = RowStatistics::from_values(&[2.0, 2.0, 2.0, 2.0]);
        assert_eq!(stats.sd, 0.0);
        assert_eq!(stats.lower, 2.0);
        assert_eq!(stats.upper, 2.0);
    }
}
