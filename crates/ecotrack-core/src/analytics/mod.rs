//! Carbon accounting analytics
//!
//! Calculator (emissions, offsets, sector breakdown, monthly trends), linear
//! emissions forecasting, and rule-based insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CarbonMetrics, MonthlyRecord, MonthlyTrend, SectorEmission};

pub mod calculator;
pub mod forecasting;
pub mod insights;
pub mod trends;

#[cfg(test)]
mod tests;

pub use calculator::{round_cents, Calculator};
pub use forecasting::{forecast_emissions, predict, ForecastData, TrendDirection, FORECAST_HORIZON};
pub use insights::generate_insights;
pub use trends::TrendGrouping;

/// Complete analytics for a record set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonReport {
    /// Totals and neutrality
    pub metrics: CarbonMetrics,
    /// Per-sector emissions
    pub sectors: Vec<SectorEmission>,
    /// Monthly trends
    pub trends: Vec<MonthlyTrend>,
    /// Emissions forecast
    pub forecast: ForecastData,
    /// Actionable insights
    pub insights: Vec<String>,
    /// Grouping used for trends
    pub grouping: TrendGrouping,
    /// Number of records analyzed
    pub record_count: usize,
    /// Timestamp of computation
    pub computed_at: DateTime<Utc>,
}

impl CarbonReport {
    /// Compute every derived view from `records`
    ///
    /// Forecast input is the trend emissions series in trend order.
    pub fn compute(
        calculator: &Calculator,
        records: &[MonthlyRecord],
        grouping: TrendGrouping,
    ) -> Self {
        let metrics = calculator.aggregate(records);
        let sectors = calculator.sector_breakdown(records);
        let trends = calculator.monthly_trends(records, grouping);
        let forecast = forecast_emissions(&trends);
        let insights = generate_insights(&metrics, &sectors, &forecast);

        tracing::debug!(
            records = records.len(),
            months = trends.len(),
            neutral = metrics.is_neutral,
            "Computed carbon report"
        );

        Self {
            metrics,
            sectors,
            trends,
            forecast,
            insights,
            grouping,
            record_count: records.len(),
            computed_at: Utc::now(),
        }
    }
}
