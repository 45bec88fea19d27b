//! Emissions forecasting with linear regression
//!
//! Fits y = slope * x + intercept over the monthly emission series and
//! extrapolates the next 6 months. No seasonality, no confidence interval.

use serde::{Deserialize, Serialize};

use crate::models::MonthlyTrend;

/// Number of future months predicted
pub const FORECAST_HORIZON: usize = 6;

/// Minimum number of historical points needed for a fit
pub const MIN_FORECAST_POINTS: usize = 2;

/// Forecast data with predictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastData {
    /// Predicted emissions for the next 6 months (kg CO₂, clamped at 0)
    pub predictions: Vec<f64>,
    /// Fitted slope (kg CO₂ per month)
    pub slope: f64,
    /// Fitted intercept (kg CO₂ at the first observed month)
    pub intercept: f64,
    /// Mean of the predictions
    pub average_prediction: f64,
    /// Change from the first observed month to the average prediction, in percent
    /// (positive = reduction)
    pub projected_reduction_pct: f64,
    /// Trend direction
    pub trend_direction: TrendDirection,
    /// Reason if unavailable
    pub unavailable_reason: Option<String>,
}

/// Trend direction with percentage change over the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Increasing trend (percentage)
    Up(f64),
    /// Decreasing trend (percentage)
    Down(f64),
    /// Stable trend (<1% slope relative to intercept)
    Stable,
}

impl ForecastData {
    /// Create unavailable forecast with reason
    pub fn unavailable(reason: &str) -> Self {
        Self {
            predictions: Vec::new(),
            slope: 0.0,
            intercept: 0.0,
            average_prediction: 0.0,
            projected_reduction_pct: 0.0,
            trend_direction: TrendDirection::Stable,
            unavailable_reason: Some(reason.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.unavailable_reason.is_none()
    }
}

/// Predict the next 6 values of an emission series
///
/// `x` is the position in `series` (0..n-1). Returns an empty vector for fewer
/// than 2 points, otherwise exactly 6 values for x = n..n+5, each clamped at 0.
pub fn predict(series: &[f64]) -> Vec<f64> {
    match fit(series) {
        Some((slope, intercept)) => project(series.len(), slope, intercept),
        None => Vec::new(),
    }
}

/// Forecast emissions from monthly trends
///
/// Trends are fitted in chronological order (year, then month), whatever order
/// they are listed in. Month-only trends carry no year and stay in calendar order.
///
/// # Returns
/// - `ForecastData::unavailable()` if <2 months of data
/// - `ForecastData` with 6 predictions otherwise
pub fn forecast_emissions(trends: &[MonthlyTrend]) -> ForecastData {
    let series = chronological_series(trends);

    let Some((slope, intercept)) = fit(&series) else {
        return ForecastData::unavailable("Insufficient data (<2 months)");
    };

    let predictions = project(series.len(), slope, intercept);
    let average_prediction = predictions.iter().sum::<f64>() / predictions.len() as f64;

    // First observed month of 0 would divide by zero; compare against 1 kg instead
    let baseline = match series.first() {
        Some(&first) if first != 0.0 => first,
        _ => 1.0,
    };
    let projected_reduction_pct = (series[0] - average_prediction) / baseline * 100.0;

    ForecastData {
        predictions,
        slope,
        intercept,
        average_prediction,
        projected_reduction_pct,
        trend_direction: direction(slope, intercept),
        unavailable_reason: None,
    }
}

/// Emissions ordered by (year, month)
fn chronological_series(trends: &[MonthlyTrend]) -> Vec<f64> {
    let mut ordered: Vec<&MonthlyTrend> = trends.iter().collect();
    ordered.sort_by_key(|t| (t.year, t.month));
    ordered.iter().map(|t| t.emissions).collect()
}

/// Ordinary least-squares fit over (index, value)
///
/// # Returns
/// (slope, intercept), or `None` for fewer than 2 points
fn fit(series: &[f64]) -> Option<(f64, f64)> {
    if series.len() < MIN_FORECAST_POINTS {
        return None;
    }

    let n = series.len() as f64;
    let sum_x: f64 = (0..series.len()).map(|i| i as f64).sum();
    let sum_y: f64 = series.iter().sum();
    let sum_xx: f64 = (0..series.len()).map(|i| (i * i) as f64).sum();
    let sum_xy: f64 = series.iter().enumerate().map(|(i, y)| i as f64 * y).sum();

    // Zero only when every x is equal, which n >= 2 distinct indices rule out
    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator != 0.0 {
        (n * sum_xy - sum_x * sum_y) / denominator
    } else {
        0.0
    };
    let intercept = (sum_y - slope * sum_x) / n;

    Some((slope, intercept))
}

fn project(len: usize, slope: f64, intercept: f64) -> Vec<f64> {
    (len..len + FORECAST_HORIZON)
        .map(|x| (intercept + slope * x as f64).max(0.0))
        .collect()
}

fn direction(slope: f64, intercept: f64) -> TrendDirection {
    if slope == 0.0 || slope.abs() < 0.01 * intercept.abs() {
        return TrendDirection::Stable;
    }

    // Flat-at-zero start: express change against 1 kg
    let base = if intercept != 0.0 { intercept.abs() } else { 1.0 };
    let change_pct = (slope * FORECAST_HORIZON as f64 / base * 100.0).abs();

    if slope > 0.0 {
        TrendDirection::Up(change_pct)
    } else {
        TrendDirection::Down(change_pct)
    }
}
