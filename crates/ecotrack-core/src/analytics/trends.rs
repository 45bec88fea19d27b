//! Monthly trends
//!
//! Groups records by calendar month (optionally split by year) and orders the
//! result Jan..Dec, matching the dashboard's trend chart axis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calculator::{round_cents, Calculator};
use crate::models::{Month, MonthlyRecord, MonthlyTrend};

/// Grouping key for monthly trends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendGrouping {
    /// One entry per (month, year); Jan 2023 and Jan 2024 stay separate
    #[default]
    MonthAndYear,
    /// One entry per month name; same-named months of different years are merged
    MonthOnly,
}

/// Monthly aggregate helper
#[derive(Default)]
struct MonthlyAggregate {
    emissions: f64,
    offsets: f64,
}

impl Calculator {
    /// Emissions, offsets and net per month present in `records`
    ///
    /// Ordered Jan..Dec; under [`TrendGrouping::MonthAndYear`] the same month of
    /// different years is ordered by year. Values are rounded to 2 decimals.
    pub fn monthly_trends(
        &self,
        records: &[MonthlyRecord],
        grouping: TrendGrouping,
    ) -> Vec<MonthlyTrend> {
        // Key (month, year) sorts by calendar month first
        let mut groups: BTreeMap<(Month, Option<i32>), MonthlyAggregate> = BTreeMap::new();

        for record in records {
            let year = match grouping {
                TrendGrouping::MonthAndYear => Some(record.year),
                TrendGrouping::MonthOnly => None,
            };

            let agg = groups.entry((record.month, year)).or_default();
            agg.emissions += self.emissions_of(record);
            agg.offsets += self.offsets_of(record);
        }

        groups
            .into_iter()
            .map(|((month, year), agg)| MonthlyTrend {
                month,
                year,
                emissions: round_cents(agg.emissions),
                offsets: round_cents(agg.offsets),
                net: round_cents(agg.emissions - agg.offsets),
            })
            .collect()
    }
}
