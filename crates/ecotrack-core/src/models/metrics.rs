//! Derived carbon metrics (never persisted, recomputed from records)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Month;

/// Aggregate emissions/offsets over a set of records (kg CO₂, 2 decimals)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonMetrics {
    pub total_emissions: f64,
    pub total_offsets: f64,
    /// Emissions minus offsets (negative when offsets exceed emissions)
    pub net_footprint: f64,
    /// Net footprint <= 0
    pub is_neutral: bool,
}

impl CarbonMetrics {
    /// Share of emissions covered by offsets, in percent (0 when nothing is emitted)
    pub fn offset_coverage_pct(&self) -> f64 {
        if self.total_emissions > 0.0 {
            self.total_offsets / self.total_emissions * 100.0
        } else {
            0.0
        }
    }

    /// Status label used by reports
    pub fn status_label(&self) -> &'static str {
        if self.is_neutral {
            "CARBON NEUTRAL"
        } else {
            "EMITTING"
        }
    }
}

/// Emission source category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Electricity,
    Diesel,
    Petrol,
    Waste,
    Water,
}

impl Sector {
    /// Fixed breakdown order
    pub const ALL: [Sector; 5] = [
        Sector::Electricity,
        Sector::Diesel,
        Sector::Petrol,
        Sector::Waste,
        Sector::Water,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sector::Electricity => "Electricity",
            Sector::Diesel => "Diesel",
            Sector::Petrol => "Petrol",
            Sector::Waste => "Waste",
            Sector::Water => "Water",
        }
    }

    /// Chart color (CSS hsl)
    pub fn color(&self) -> &'static str {
        match self {
            Sector::Electricity => "hsl(152, 45%, 28%)",
            Sector::Diesel => "hsl(38, 92%, 50%)",
            Sector::Petrol => "hsl(0, 65%, 50%)",
            Sector::Waste => "hsl(270, 50%, 50%)",
            Sector::Water => "hsl(200, 80%, 50%)",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emissions attributed to one sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorEmission {
    pub sector: Sector,
    /// kg CO₂ (2 decimals)
    pub emission: f64,
    /// Share of all sectors, 0-100 (2 decimals); 0 when nothing is emitted
    pub percentage: f64,
    pub color: String,
}

/// Emissions and offsets for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: Month,
    /// `None` when grouped by month only
    pub year: Option<i32>,
    pub emissions: f64,
    pub offsets: f64,
    pub net: f64,
}

impl MonthlyTrend {
    /// Axis label ("Jan 2024", or "Jan" for month-only grouping)
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} {}", self.month, year),
            None => self.month.to_string(),
        }
    }
}
