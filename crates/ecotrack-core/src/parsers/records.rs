//! Monthly records parser
//!
//! Reads a JSON array of [`MonthlyRecord`]s. The file must be a valid JSON array;
//! individual entries that fail to deserialize or validate are skipped and
//! reported as warnings so the remaining records stay usable.

use crate::error::{CoreError, LoadReport, LoadWarning};
use crate::models::MonthlyRecord;
use std::path::Path;
use tracing::{debug, warn};

/// Parser for records JSON files
#[derive(Debug, Default)]
pub struct RecordsParser;

impl RecordsParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a records file
    pub fn parse(&self, path: &Path) -> Result<(Vec<MonthlyRecord>, LoadReport), CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let result = self.parse_str(&content, path)?;
        debug!(
            path = %path.display(),
            loaded = result.1.records_loaded,
            skipped = result.1.records_skipped,
            "Parsed records file"
        );
        Ok(result)
    }

    /// Parse records from JSON content; `path` is only used for error reporting
    pub fn parse_str(
        &self,
        content: &str,
        path: &Path,
    ) -> Result<(Vec<MonthlyRecord>, LoadReport), CoreError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(content).map_err(|e| CoreError::JsonParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            })?;

        let mut report = LoadReport::new();
        let mut records = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            report.records_scanned += 1;

            let label = entry
                .get("id")
                .and_then(|id| id.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));

            let record = match serde_json::from_value::<MonthlyRecord>(entry) {
                Ok(record) => record,
                Err(e) => {
                    warn!(record = %label, error = %e, "Skipping malformed record");
                    report.skip(
                        LoadWarning::new("records", format!("Malformed record {}: {}", label, e))
                            .with_suggestion("Check field names (camelCase) and month labels"),
                    );
                    continue;
                }
            };

            if let Err(e) = record.validate() {
                warn!(record = %label, error = %e, "Skipping invalid record");
                report.skip(LoadWarning::from_core_error("records", &e));
                continue;
            }

            records.push(record);
        }

        report.records_loaded = records.len();
        Ok((records, report))
    }
}
