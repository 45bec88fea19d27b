//! Data models for ecotrack

pub mod metrics;
pub mod record;

pub use metrics::{CarbonMetrics, MonthlyTrend, Sector, SectorEmission};
pub use record::{Month, MonthlyRecord};
