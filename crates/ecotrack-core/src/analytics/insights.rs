//! Actionable insights generation
//!
//! Rule-based observations shown next to the dashboard charts.

use super::forecasting::{ForecastData, TrendDirection};
use crate::models::{CarbonMetrics, SectorEmission};

/// Forecast growth (percent over the horizon) that triggers a warning
const RISING_TREND_THRESHOLD_PCT: f64 = 10.0;

/// Generate actionable insights
///
/// Rules:
/// - Largest emitting sector with its share (only when something is emitted)
/// - Neutral → surplus offsets; emitting → net footprint and offset coverage
/// - Forecast up >10% → rising emissions warning; down → declining note
/// - Forecast unavailable → reason
pub fn generate_insights(
    metrics: &CarbonMetrics,
    sectors: &[SectorEmission],
    forecast: &ForecastData,
) -> Vec<String> {
    let mut insights = Vec::new();

    // 1. Top emitter
    let top = sectors
        .iter()
        .filter(|s| s.emission > 0.0)
        .max_by(|a, b| a.emission.total_cmp(&b.emission));
    if let Some(top) = top {
        insights.push(format!(
            "{} is the largest emission source: {:.2} kg CO₂ ({:.0}% of total).",
            top.sector, top.emission, top.percentage
        ));
    }

    // 2. Neutrality status
    if metrics.is_neutral {
        insights.push(format!(
            "Carbon neutral: offsets exceed emissions by {:.2} kg CO₂.",
            metrics.total_offsets - metrics.total_emissions
        ));
    } else {
        insights.push(format!(
            "Net footprint {:.2} kg CO₂. Offsets cover {:.0}% of emissions.",
            metrics.net_footprint,
            metrics.offset_coverage_pct()
        ));
    }

    // 3. Forecast direction
    match (&forecast.unavailable_reason, forecast.trend_direction) {
        (Some(reason), _) => {
            insights.push(format!("Forecast unavailable: {}.", reason));
        }
        (None, TrendDirection::Up(pct)) if pct > RISING_TREND_THRESHOLD_PCT => {
            insights.push(format!(
                "Emissions trending up: +{:.0}% over the next 6 months (avg {:.0} kg CO₂/month).",
                pct, forecast.average_prediction
            ));
        }
        (None, TrendDirection::Down(pct)) => {
            insights.push(format!(
                "Emissions trending down: -{:.0}% over the next 6 months.",
                pct
            ));
        }
        _ => {}
    }

    insights
}
