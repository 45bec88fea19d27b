//! Export functionality for records and carbon reports
//!
//! Provides simple, testable export with proper error handling.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analytics::{CarbonReport, Calculator};
use crate::models::MonthlyRecord;

/// Sections included in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Emission totals (CSV column + report section)
    pub include_emissions: bool,
    /// Offset totals and neutrality status (CSV column + report section)
    pub include_offsets: bool,
    /// Per-month breakdown (text report only)
    pub include_monthly_breakdown: bool,
    /// Sector-wise emissions (text report only)
    pub include_sector_analysis: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_emissions: true,
            include_offsets: true,
            include_monthly_breakdown: true,
            include_sector_analysis: true,
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Quote a CSV field, doubling embedded quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Export raw records to CSV with optional computed totals
///
/// CSV columns: Unit, Month, Year, Electricity (kWh), Diesel (L), Petrol (L),
/// Waste (kg), Water (L), Solar Units, Trees Planted
/// [, Total Emissions (kg CO₂)] [, Total Offsets (kg CO₂)]
///
/// Rows follow input order. Records without a unit are labelled "Unknown".
///
/// # Errors
/// Returns error if file creation or write operations fail
pub fn export_records_to_csv(
    records: &[MonthlyRecord],
    calculator: &Calculator,
    path: &Path,
    options: &ReportOptions,
) -> Result<()> {
    create_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);

    // Write header
    let mut header = String::from(
        "Unit,Month,Year,Electricity (kWh),Diesel (L),Petrol (L),Waste (kg),Water (L),Solar Units,Trees Planted",
    );
    if options.include_emissions {
        header.push_str(",Total Emissions (kg CO₂)");
    }
    if options.include_offsets {
        header.push_str(",Total Offsets (kg CO₂)");
    }
    writeln!(writer, "{}", header).context("Failed to write CSV header")?;

    // Write data rows
    for record in records {
        let mut row = format!(
            "{},{},{},{},{},{},{},{},{},{}",
            csv_field(record.unit_id.as_deref().unwrap_or("Unknown")),
            record.month,
            record.year,
            record.electricity_kwh,
            record.diesel_liters,
            record.petrol_liters,
            record.waste_kg,
            record.water_liters,
            record.solar_units,
            record.trees_planted
        );
        if options.include_emissions {
            row.push_str(&format!(",{:.2}", calculator.emissions_of(record)));
        }
        if options.include_offsets {
            row.push_str(&format!(",{:.2}", calculator.offsets_of(record)));
        }

        writeln!(writer, "{}", row)
            .with_context(|| format!("Failed to write row for record {}", record.id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Render a plain-text carbon footprint report
///
/// Sections: summary, emissions analysis, offset analysis, monthly breakdown,
/// sector-wise emissions, forecast. `scope` describes the filtered region/period.
///
/// # Errors
/// Returns error if formatting fails
pub fn render_text_report(
    report: &CarbonReport,
    scope: &str,
    options: &ReportOptions,
) -> Result<String> {
    let mut out = String::new();
    write_text_report(&mut out, report, scope, options).context("Failed to render report")?;
    Ok(out)
}

fn write_text_report(
    out: &mut impl fmt::Write,
    report: &CarbonReport,
    scope: &str,
    options: &ReportOptions,
) -> fmt::Result {
    let metrics = &report.metrics;

    writeln!(out, "CARBON FOOTPRINT REPORT")?;
    writeln!(out, "========================")?;
    writeln!(out, "Generated: {}", report.computed_at.format("%Y-%m-%d"))?;
    writeln!(out)?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "-------")?;
    writeln!(out, "Scope: {}", scope)?;
    writeln!(out, "Total Data Entries: {}", report.record_count)?;
    writeln!(out)?;

    if options.include_emissions {
        let average = metrics.total_emissions / report.record_count.max(1) as f64;
        writeln!(out, "EMISSIONS ANALYSIS")?;
        writeln!(out, "------------------")?;
        writeln!(out, "Total CO₂ Emissions: {:.2} kg CO₂", metrics.total_emissions)?;
        writeln!(out, "Average Monthly Emissions: {:.2} kg CO₂", average)?;
        writeln!(out)?;
    }

    if options.include_offsets {
        writeln!(out, "OFFSET ANALYSIS")?;
        writeln!(out, "---------------")?;
        writeln!(out, "Total CO₂ Offsets: {:.2} kg CO₂", metrics.total_offsets)?;
        writeln!(out, "Net Carbon Footprint: {:.2} kg CO₂", metrics.net_footprint)?;
        writeln!(out, "Carbon Status: {}", metrics.status_label())?;
        writeln!(out)?;
    }

    if options.include_monthly_breakdown && !report.trends.is_empty() {
        writeln!(out, "MONTHLY BREAKDOWN")?;
        writeln!(out, "-----------------")?;
        for trend in &report.trends {
            writeln!(
                out,
                "{}: Emissions: {:.0} kg | Offsets: {:.0} kg",
                trend.label(),
                trend.emissions,
                trend.offsets
            )?;
        }
        writeln!(out)?;
    }

    if options.include_sector_analysis {
        writeln!(out, "SECTOR-WISE EMISSIONS")?;
        writeln!(out, "---------------------")?;
        for sector in &report.sectors {
            writeln!(
                out,
                "{}: {:.0} kg CO₂ ({:.1}%)",
                sector.sector, sector.emission, sector.percentage
            )?;
        }
        writeln!(out)?;
    }

    let forecast = &report.forecast;
    if forecast.is_available() {
        let predictions: Vec<String> = forecast
            .predictions
            .iter()
            .map(|p| format!("{:.0}", p))
            .collect();
        writeln!(out, "6-MONTH FORECAST")?;
        writeln!(out, "----------------")?;
        writeln!(out, "Predicted Emissions (kg CO₂): {}", predictions.join(", "))?;
        writeln!(
            out,
            "Average Predicted Emission: {:.2} kg CO₂",
            forecast.average_prediction
        )?;
        writeln!(
            out,
            "Projected Reduction: {:.1}%",
            forecast.projected_reduction_pct
        )?;
        writeln!(out)?;
    }

    Ok(())
}

/// Export a plain-text carbon footprint report
///
/// # Errors
/// Returns error if rendering, file creation or write fails
pub fn export_text_report(
    report: &CarbonReport,
    scope: &str,
    options: &ReportOptions,
    path: &Path,
) -> Result<()> {
    create_parent_dir(path)?;

    let content = render_text_report(report, scope, options)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(())
}

/// Export a computed report to JSON format
///
/// Pretty-printed JSON of metrics, sectors, trends, forecast and insights
///
/// # Errors
/// Returns error if serialization or file write fails
pub fn export_report_to_json(report: &CarbonReport, path: &Path) -> Result<()> {
    create_parent_dir(path)?;

    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;

    Ok(())
}
