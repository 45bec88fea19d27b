//! ecotrack-core - Core library for ecotrack
//!
//! Carbon accounting for panchayat monthly consumption data: emissions and
//! offsets calculator, monthly trends, linear forecasting, record loading and
//! report export.

pub mod analytics;
pub mod error;
pub mod export;
pub mod factors;
pub mod models;
pub mod parsers;

pub use analytics::{Calculator, CarbonReport, ForecastData, TrendGrouping};
pub use error::{CoreError, LoadReport};
pub use export::{export_records_to_csv, export_report_to_json, export_text_report, ReportOptions};
pub use factors::CarbonFactors;
pub use parsers::{RecordFilter, RecordsParser};
