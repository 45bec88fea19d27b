//! Error types for ecotrack-core
//!
//! `CoreError` for hard failures, `LoadReport` for records skipped while loading.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ecotrack operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    // ===================
    // Data Errors
    // ===================
    #[error("Invalid record {record_id}: {reason}")]
    InvalidRecord { record_id: String, reason: String },

    #[error("Unknown month: {value:?}")]
    InvalidMonth { value: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// One record skipped during load, with an optional hint for the user
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub source: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LoadWarning {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Warning for a record rejected with `error`
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let warning = Self::new(source, error.to_string());
        match error {
            CoreError::InvalidRecord { .. } => {
                warning.with_suggestion("Quantities must be finite and non-negative")
            }
            _ => warning,
        }
    }
}

/// Outcome of loading a records file
///
/// Bad entries do not fail the load; they are counted and listed here.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub warnings: Vec<LoadWarning>,
    pub records_scanned: usize,
    pub records_loaded: usize,
    pub records_skipped: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a skipped record and keep its warning
    pub fn skip(&mut self, warning: LoadWarning) {
        self.records_skipped += 1;
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_counts_and_keeps_warning() {
        let mut report = LoadReport::new();
        assert!(!report.has_warnings());

        report.skip(LoadWarning::new("records", "Malformed record #3"));

        assert_eq!(report.records_skipped, 1);
        assert!(report.has_warnings());
        assert_eq!(report.warnings[0].message, "Malformed record #3");
    }

    #[test]
    fn test_invalid_record_warning_has_suggestion() {
        let error = CoreError::InvalidRecord {
            record_id: "rec-1".to_string(),
            reason: "dieselLiters is negative".to_string(),
        };
        let warning = LoadWarning::from_core_error("records", &error);

        assert_eq!(warning.source, "records");
        assert!(warning.message.contains("rec-1"));
        assert!(warning.suggestion.is_some());
    }

    #[test]
    fn test_other_errors_have_no_suggestion() {
        let error = CoreError::InvalidConfig {
            message: "bad".to_string(),
        };
        assert!(LoadWarning::from_core_error("factors", &error)
            .suggestion
            .is_none());
    }
}
