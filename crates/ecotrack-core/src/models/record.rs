//! Monthly consumption record submitted for a panchayat
//!
//! JSON shape matches the dashboard's data-entry payload (camelCase keys):
//! `{"id": "...", "userId": "...", "month": "Jan", "year": 2024, "electricityKwh": 1200, ...}`
//! Missing quantities default to zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Calendar month of a reporting period
///
/// Variant order is the canonical calendar order, so `Ord` sorts Jan..Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Short label ("Jan")
    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Zero-based position in the calendar (Jan = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Month following this one, wrapping Dec -> Jan
    pub fn succ(&self) -> Month {
        Month::ALL[(self.index() + 1) % 12]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = CoreError;

    /// Accepts short or long month names, case-insensitive ("jan", "January")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let prefix = lower.get(..3).unwrap_or(&lower);

        let month = Month::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(prefix))
            .ok_or_else(|| CoreError::InvalidMonth {
                value: s.to_string(),
            })?;

        // Reject things like "Janitor": longer input must be the full month name
        if lower.len() > 3 && !full_name(month).starts_with(&lower) {
            return Err(CoreError::InvalidMonth {
                value: s.to_string(),
            });
        }

        Ok(month)
    }
}

fn full_name(month: Month) -> &'static str {
    match month {
        Month::Jan => "january",
        Month::Feb => "february",
        Month::Mar => "march",
        Month::Apr => "april",
        Month::May => "may",
        Month::Jun => "june",
        Month::Jul => "july",
        Month::Aug => "august",
        Month::Sep => "september",
        Month::Oct => "october",
        Month::Nov => "november",
        Month::Dec => "december",
    }
}

impl TryFrom<String> for Month {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.label().to_string()
    }
}

/// One reporting period for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub id: String,

    /// Submitting user
    pub user_id: String,

    /// Panchayat the record belongs to
    #[serde(default, alias = "panchayatId")]
    pub unit_id: Option<String>,

    pub month: Month,
    pub year: i32,

    #[serde(default)]
    pub electricity_kwh: f64,
    #[serde(default)]
    pub diesel_liters: f64,
    #[serde(default)]
    pub petrol_liters: f64,
    #[serde(default)]
    pub waste_kg: f64,
    #[serde(default)]
    pub water_liters: f64,

    /// Solar units generated (offset)
    #[serde(default)]
    pub solar_units: f64,

    /// Trees planted (offset)
    #[serde(default)]
    pub trees_planted: u32,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MonthlyRecord {
    /// Record with every quantity at zero
    pub fn empty(
        id: impl Into<String>,
        user_id: impl Into<String>,
        month: Month,
        year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            unit_id: None,
            month,
            year,
            electricity_kwh: 0.0,
            diesel_liters: 0.0,
            petrol_liters: 0.0,
            waste_kg: 0.0,
            water_liters: 0.0,
            solar_units: 0.0,
            trees_planted: 0,
            created_at: None,
        }
    }

    /// Named real-valued quantities (trees are a count and always valid)
    fn quantities(&self) -> [(&'static str, f64); 6] {
        [
            ("electricityKwh", self.electricity_kwh),
            ("dieselLiters", self.diesel_liters),
            ("petrolLiters", self.petrol_liters),
            ("wasteKg", self.waste_kg),
            ("waterLiters", self.water_liters),
            ("solarUnits", self.solar_units),
        ]
    }

    /// Check that every quantity is finite and non-negative
    ///
    /// The calculator never re-validates; loaders call this before handing records over.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in self.quantities() {
            if !value.is_finite() {
                return Err(CoreError::InvalidRecord {
                    record_id: self.id.clone(),
                    reason: format!("{} is not a finite number", name),
                });
            }
            if value < 0.0 {
                return Err(CoreError::InvalidRecord {
                    record_id: self.id.clone(),
                    reason: format!("{} is negative ({})", name, value),
                });
            }
        }
        Ok(())
    }
}
