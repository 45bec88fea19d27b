//! Record filtering by unit, user and reporting period
//!
//! Every field is optional; a record matches when it satisfies all the set fields.

use crate::models::{Month, MonthlyRecord};

/// Filter applied before computing analytics or exporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Panchayat id
    pub unit_id: Option<String>,
    /// Submitting user id
    pub user_id: Option<String>,
    pub year: Option<i32>,
    pub month: Option<Month>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// No field set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &MonthlyRecord) -> bool {
        if let Some(unit) = &self.unit_id {
            if record.unit_id.as_deref() != Some(unit.as_str()) {
                return false;
            }
        }
        if let Some(user) = &self.user_id {
            if &record.user_id != user {
                return false;
            }
        }
        if self.year.is_some_and(|year| record.year != year) {
            return false;
        }
        if self.month.is_some_and(|month| record.month != month) {
            return false;
        }
        true
    }

    /// Keep matching records, preserving input order
    pub fn apply(&self, records: &[MonthlyRecord]) -> Vec<MonthlyRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Human-readable scope ("Unit p-1, 2024"), "All units" when unfiltered
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match &self.unit_id {
            Some(unit) => parts.push(format!("Unit {}", unit)),
            None => parts.push("All units".to_string()),
        }
        if let Some(user) = &self.user_id {
            parts.push(format!("user {}", user));
        }
        match (self.month, self.year) {
            (Some(month), Some(year)) => parts.push(format!("{} {}", month, year)),
            (Some(month), None) => parts.push(month.to_string()),
            (None, Some(year)) => parts.push(year.to_string()),
            (None, None) => {}
        }
        parts.join(", ")
    }
}
