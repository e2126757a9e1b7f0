//! Statistical helper functions and seasonal goodness-of-fit measures for
//! comparing measured soil-water data against crop-water-balance model
//! output.

mod error;

pub use error::StatsError;

use serde::Serialize;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Returns true if every element of the slice equals the first one.
/// An empty slice is considered identical.
pub fn all_identical(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] == w[1])
}

/// Pearson correlation coefficient.
///
/// Returns `None` if the slices are empty or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }

    let n = x.len() as f64;
    let mx: f64 = x.iter().sum::<f64>() / n;
    let my: f64 = y.iter().sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

/// Seasonal goodness-of-fit summary for a measured vs. modeled series pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    /// Root mean square error, in the units of the input series.
    pub rmse: f64,
    /// Percent bias of the modeled mean relative to the measured mean.
    pub bias_pct: f64,
    /// Squared Pearson correlation coefficient.
    pub r_squared: f64,
    /// Nash-Sutcliffe model efficiency coefficient.
    pub nse: f64,
}

impl FitSummary {
    /// The summary reported when the comparison is degenerate: both series
    /// identical, or either series constant. Variance-based formulas divide
    /// by zero there, so the pair is scored as a perfect match by policy.
    pub fn perfect() -> Self {
        Self {
            rmse: 0.0,
            bias_pct: 0.0,
            r_squared: 1.0,
            nse: 1.0,
        }
    }
}

/// Compute RMSE, percent bias, R-squared, and Nash-Sutcliffe efficiency for
/// a measured vs. modeled series pair.
///
/// If the two series are element-wise identical, or either series is
/// constant, returns [`FitSummary::perfect`] rather than dividing by zero in
/// the variance-based formulas.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`] if either series is empty,
/// [`StatsError::LengthMismatch`] if the lengths differ, and
/// [`StatsError::ZeroMeanMeasured`] if the measured mean is zero on a
/// non-degenerate pair (percent bias would be undefined).
pub fn goodness_of_fit(meas: &[f64], modeled: &[f64]) -> Result<FitSummary, StatsError> {
    if meas.is_empty() || modeled.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if meas.len() != modeled.len() {
        return Err(StatsError::LengthMismatch {
            meas_len: meas.len(),
            modeled_len: modeled.len(),
        });
    }

    if meas == modeled || all_identical(meas) || all_identical(modeled) {
        return Ok(FitSummary::perfect());
    }

    let meas_mean = mean(meas);
    if meas_mean == 0.0 {
        return Err(StatsError::ZeroMeanMeasured);
    }
    let modeled_mean = mean(modeled);

    let n = meas.len() as f64;
    let sse: f64 = meas
        .iter()
        .zip(modeled.iter())
        .map(|(o, s)| (o - s) * (o - s))
        .sum();
    let sst: f64 = meas.iter().map(|&o| (o - meas_mean) * (o - meas_mean)).sum();

    let rmse = (sse / n).sqrt();
    let bias_pct = (modeled_mean - meas_mean) / meas_mean * 100.0;
    // OLS regression of measured on modeled; its R-squared equals the
    // squared Pearson correlation.
    let r_squared = pearson_correlation(modeled, meas)
        .map(|r| r * r)
        .unwrap_or(f64::NAN);
    let nse = 1.0 - sse / sst;

    Ok(FitSummary {
        rmse,
        bias_pct,
        r_squared,
        nse,
    })
}
