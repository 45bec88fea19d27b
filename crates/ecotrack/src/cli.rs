//! CLI commands for carbon reports
//!
//! Loads records, applies the unit/user/period filter, and formats calculator
//! output as terminal tables or JSON.

use ecotrack_core::analytics::{ForecastData, TrendDirection};
use ecotrack_core::error::CoreError;
use ecotrack_core::models::{MonthlyRecord, MonthlyTrend, SectorEmission};
use ecotrack_core::{CarbonFactors, CarbonReport, LoadReport, RecordFilter, RecordsParser};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    NoRecords { scope: String, scanned: usize },
    Core(CoreError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NoRecords { scope, scanned } => {
                write!(
                    f,
                    "No records match {} ({} records loaded)",
                    scope, scanned
                )
            }
            CliError::Core(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        CliError::Core(e)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load records from `path` and keep those matching `filter`
///
/// Skipped records are printed to stderr. An empty selection is an error so
/// that every command reports on real data.
pub fn load_filtered(
    path: &Path,
    filter: &RecordFilter,
) -> Result<(Vec<MonthlyRecord>, LoadReport), CliError> {
    let (records, report) = RecordsParser::new().parse(path)?;

    for warning in &report.warnings {
        eprintln!("warning: {}: {}", warning.source, warning.message);
        if let Some(suggestion) = &warning.suggestion {
            eprintln!("  hint: {}", suggestion);
        }
    }

    let selected = filter.apply(&records);
    if selected.is_empty() {
        return Err(CliError::NoRecords {
            scope: filter.describe(),
            scanned: records.len(),
        });
    }

    tracing::debug!(
        loaded = records.len(),
        selected = selected.len(),
        scope = %filter.describe(),
        "Applied record filter"
    );

    Ok((selected, report))
}

// ============================================================================
// Formatters
// ============================================================================

fn header_cells(names: &[&str], no_color: bool) -> Vec<Cell> {
    names
        .iter()
        .map(|name| {
            let cell = Cell::new(name);
            if no_color {
                cell
            } else {
                cell.fg(Color::Cyan)
            }
        })
        .collect()
}

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header_cells(headers, no_color));
    table
}

/// Format the summary (metrics + insights) as text or JSON
pub fn format_summary(report: &CarbonReport, scope: &str, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
    }

    let metrics = &report.metrics;
    let mut lines = vec![];
    lines.push(format!("Scope:            {}", scope));
    lines.push(format!("Records:          {}", report.record_count));
    lines.push(format!(
        "Total emissions:  {:.2} kg CO₂",
        metrics.total_emissions
    ));
    lines.push(format!(
        "Total offsets:    {:.2} kg CO₂",
        metrics.total_offsets
    ));
    lines.push(format!(
        "Net footprint:    {:.2} kg CO₂",
        metrics.net_footprint
    ));
    lines.push(format!(
        "Offset coverage:  {:.1}%",
        metrics.offset_coverage_pct()
    ));
    lines.push(format!("Status:           {}", metrics.status_label()));

    if !report.insights.is_empty() {
        lines.push(String::new());
        lines.push("Insights:".to_string());
        for insight in &report.insights {
            lines.push(format!("  - {}", insight));
        }
    }

    lines.join("\n")
}

/// Format sector emissions as table (human) or JSON
pub fn format_sectors_table(sectors: &[SectorEmission], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(sectors).unwrap_or_else(|_| "[]".to_string());
    }

    let mut table = new_table(&["Sector", "Emissions (kg CO₂)", "Share"], no_color);
    for sector in sectors {
        table.add_row(Row::from(vec![
            sector.sector.to_string(),
            format!("{:.2}", sector.emission),
            format!("{:.2}%", sector.percentage),
        ]));
    }

    table.to_string()
}

/// Format monthly trends as table (human) or JSON
pub fn format_trends_table(trends: &[MonthlyTrend], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(trends).unwrap_or_else(|_| "[]".to_string());
    }

    if trends.is_empty() {
        return "No monthly data.".to_string();
    }

    let mut table = new_table(
        &["Month", "Emissions (kg)", "Offsets (kg)", "Net (kg)"],
        no_color,
    );
    for trend in trends {
        table.add_row(Row::from(vec![
            trend.label(),
            format!("{:.2}", trend.emissions),
            format!("{:.2}", trend.offsets),
            format!("{:.2}", trend.net),
        ]));
    }

    table.to_string()
}

/// Labels for the forecast horizon, continuing after the latest observed month
fn forecast_labels(last: Option<&MonthlyTrend>, count: usize) -> Vec<String> {
    let Some(last) = last else {
        return (1..=count).map(|i| format!("+{}", i)).collect();
    };

    let mut month = last.month;
    let mut year = last.year;
    (0..count)
        .map(|_| {
            let next = month.succ();
            if next.index() < month.index() {
                year = year.map(|y| y + 1);
            }
            month = next;
            match year {
                Some(y) => format!("{} {}", month, y),
                None => month.to_string(),
            }
        })
        .collect()
}

/// Format the emissions forecast as table (human) or JSON
pub fn format_forecast_table(
    forecast: &ForecastData,
    trends: &[MonthlyTrend],
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return serde_json::to_string_pretty(forecast).unwrap_or_else(|_| "{}".to_string());
    }

    if let Some(reason) = &forecast.unavailable_reason {
        return format!("Forecast unavailable: {}", reason);
    }

    let latest = trends.iter().max_by_key(|t| (t.year, t.month));
    let labels = forecast_labels(latest, forecast.predictions.len());
    let mut table = new_table(&["Month", "Predicted emissions (kg CO₂)"], no_color);
    for (label, prediction) in labels.iter().zip(&forecast.predictions) {
        table.add_row(Row::from(vec![label.clone(), format!("{:.2}", prediction)]));
    }

    let direction = match forecast.trend_direction {
        TrendDirection::Up(pct) => format!("up {:.1}%", pct),
        TrendDirection::Down(pct) => format!("down {:.1}%", pct),
        TrendDirection::Stable => "stable".to_string(),
    };

    let mut lines = vec![table.to_string()];
    lines.push(format!(
        "Average predicted: {:.2} kg CO₂",
        forecast.average_prediction
    ));
    lines.push(format!(
        "Projected reduction: {:.1}% vs first month",
        forecast.projected_reduction_pct
    ));
    lines.push(format!(
        "Slope: {:.2} kg CO₂/month (trend {})",
        forecast.slope, direction
    ));
    lines.join("\n")
}

/// Format the effective factor set
pub fn format_factors_table(factors: &CarbonFactors, no_color: bool) -> String {
    let e = &factors.emission;
    let o = &factors.offset;
    let rows: [(&str, f64, &str); 7] = [
        ("Electricity", e.electricity, "kg CO₂ / kWh"),
        ("Diesel", e.diesel, "kg CO₂ / L"),
        ("Petrol", e.petrol, "kg CO₂ / L"),
        ("Waste", e.waste, "kg CO₂ / kg"),
        ("Water", e.water, "kg CO₂ / L"),
        ("Tree (offset)", o.tree_per_year, "kg CO₂ / tree / year"),
        ("Solar (offset)", o.solar_per_unit, "kg CO₂ / unit"),
    ];

    let mut table = new_table(&["Factor", "Value", "Unit"], no_color);
    for (name, value, unit) in rows {
        table.add_row(Row::from(vec![
            name.to_string(),
            value.to_string(),
            unit.to_string(),
        ]));
    }

    table.to_string()
}

// ============================================================================
// Tests
// ============================================================================
