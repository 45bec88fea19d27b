//! ecotrack - Carbon footprint dashboard for panchayats

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ecotrack_core::models::Month;
use ecotrack_core::{
    export_records_to_csv, export_report_to_json, export_text_report, Calculator, CarbonFactors,
    CarbonReport, RecordFilter, ReportOptions, TrendGrouping,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ecotrack",
    version,
    about = "Carbon footprint dashboard for panchayats",
    long_about = "Computes emissions, offsets, sector breakdown, monthly trends and a\n\
                  6-month linear forecast from monthly consumption records.\n\
                  \n\
                  Examples:\n\
                    ecotrack --data records.json                  # Summary (default)\n\
                    ecotrack --data records.json --unit p-1 sectors\n\
                    ecotrack --data records.json trends --month-only\n\
                    ecotrack --data records.json forecast --json\n\
                    ecotrack --data records.json export --format csv --output out.csv\n\
                    ecotrack factors                              # Effective factors\n\
                  \n\
                  Environment Variables:\n\
                    ECOTRACK_DATA                    # Records file (JSON array)\n\
                    ECOTRACK_FACTORS                 # Factors file (TOML)\n\
                    ECOTRACK_NO_COLOR                # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Records file (JSON array of monthly records)
    #[arg(long, env = "ECOTRACK_DATA")]
    data: Option<PathBuf>,

    /// Factors file (default: <config_dir>/ecotrack/factors.toml if present)
    #[arg(long, env = "ECOTRACK_FACTORS")]
    factors: Option<PathBuf>,

    /// Only records of this panchayat
    #[arg(long)]
    unit: Option<String>,

    /// Only records submitted by this user
    #[arg(long)]
    user: Option<String>,

    /// Only records of this year
    #[arg(long)]
    year: Option<i32>,

    /// Only records of this month (Jan, february, ...)
    #[arg(long)]
    month: Option<Month>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "ECOTRACK_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Print totals, neutrality status and insights (default)
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show emissions per sector
    Sectors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show monthly emissions, offsets and net
    Trends {
        /// Merge the same month of different years
        #[arg(long)]
        month_only: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict emissions for the next 6 months
    Forecast {
        /// Merge the same month of different years
        #[arg(long)]
        month_only: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write records or the report to a file
    Export {
        /// Output format
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Leave out emission totals
        #[arg(long)]
        no_emissions: bool,
        /// Leave out offset totals and status
        #[arg(long)]
        no_offsets: bool,
        /// Leave out the monthly breakdown
        #[arg(long)]
        no_monthly: bool,
        /// Leave out the sector analysis
        #[arg(long)]
        no_sectors: bool,
    },
    /// Print the effective emission and offset factors
    Factors,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// Raw records with computed totals
    Csv,
    /// Plain-text report
    Report,
    /// Full computed report
    Json,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let factors = CarbonFactors::resolve(cli.factors.as_deref())
        .context("Failed to load carbon factors")?;
    let calculator = Calculator::new(factors);

    let filter = build_filter(&cli);
    let no_color = cli.no_color;

    match cli.mode.unwrap_or(Mode::Summary { json: false }) {
        Mode::Summary { json } => {
            run_summary(&calculator, data_path(&cli.data)?, &filter, json)?;
        }
        Mode::Sectors { json } => {
            run_sectors(&calculator, data_path(&cli.data)?, &filter, json, no_color)?;
        }
        Mode::Trends { month_only, json } => {
            run_trends(
                &calculator,
                data_path(&cli.data)?,
                &filter,
                grouping(month_only),
                json,
                no_color,
            )?;
        }
        Mode::Forecast { month_only, json } => {
            run_forecast(
                &calculator,
                data_path(&cli.data)?,
                &filter,
                grouping(month_only),
                json,
                no_color,
            )?;
        }
        Mode::Export {
            format,
            output,
            no_emissions,
            no_offsets,
            no_monthly,
            no_sectors,
        } => {
            let options = ReportOptions {
                include_emissions: !no_emissions,
                include_offsets: !no_offsets,
                include_monthly_breakdown: !no_monthly,
                include_sector_analysis: !no_sectors,
            };
            run_export(
                &calculator,
                data_path(&cli.data)?,
                &filter,
                format,
                &output,
                &options,
            )?;
        }
        Mode::Factors => {
            println!("{}", cli::format_factors_table(calculator.factors(), no_color));
        }
    }

    Ok(())
}

/// Structured logs to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn build_filter(cli: &Cli) -> RecordFilter {
    let mut filter = RecordFilter::new();
    if let Some(unit) = &cli.unit {
        filter = filter.unit(unit.as_str());
    }
    if let Some(user) = &cli.user {
        filter = filter.user(user.as_str());
    }
    if let Some(year) = cli.year {
        filter = filter.year(year);
    }
    if let Some(month) = cli.month {
        filter = filter.month(month);
    }
    filter
}

fn data_path(data: &Option<PathBuf>) -> Result<&Path> {
    data.as_deref()
        .context("No records file given (use --data or ECOTRACK_DATA)")
}

fn grouping(month_only: bool) -> TrendGrouping {
    if month_only {
        TrendGrouping::MonthOnly
    } else {
        TrendGrouping::MonthAndYear
    }
}

fn run_summary(
    calculator: &Calculator,
    data: &Path,
    filter: &RecordFilter,
    json: bool,
) -> Result<()> {
    let (records, _) = cli::load_filtered(data, filter)?;
    let report = CarbonReport::compute(calculator, &records, TrendGrouping::default());

    if !json {
        println!("ecotrack - Carbon Footprint Summary");
        println!("===================================");
        println!();
    }
    println!("{}", cli::format_summary(&report, &filter.describe(), json));

    Ok(())
}

fn run_sectors(
    calculator: &Calculator,
    data: &Path,
    filter: &RecordFilter,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let (records, _) = cli::load_filtered(data, filter)?;
    let sectors = calculator.sector_breakdown(&records);

    println!("{}", cli::format_sectors_table(&sectors, json, no_color));

    Ok(())
}

fn run_trends(
    calculator: &Calculator,
    data: &Path,
    filter: &RecordFilter,
    grouping: TrendGrouping,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let (records, _) = cli::load_filtered(data, filter)?;
    let trends = calculator.monthly_trends(&records, grouping);

    println!("{}", cli::format_trends_table(&trends, json, no_color));

    Ok(())
}

fn run_forecast(
    calculator: &Calculator,
    data: &Path,
    filter: &RecordFilter,
    grouping: TrendGrouping,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let (records, _) = cli::load_filtered(data, filter)?;
    let report = CarbonReport::compute(calculator, &records, grouping);

    println!(
        "{}",
        cli::format_forecast_table(&report.forecast, &report.trends, json, no_color)
    );

    Ok(())
}

fn run_export(
    calculator: &Calculator,
    data: &Path,
    filter: &RecordFilter,
    format: ExportFormat,
    output: &Path,
    options: &ReportOptions,
) -> Result<()> {
    let (records, _) = cli::load_filtered(data, filter)?;

    match format {
        ExportFormat::Csv => {
            export_records_to_csv(&records, calculator, output, options)?;
        }
        ExportFormat::Report => {
            let report = CarbonReport::compute(calculator, &records, TrendGrouping::default());
            export_text_report(&report, &filter.describe(), options, output)?;
        }
        ExportFormat::Json => {
            let report = CarbonReport::compute(calculator, &records, TrendGrouping::default());
            export_report_to_json(&report, output)?;
        }
    }

    eprintln!(
        "✓ Exported {} records to {}",
        records.len(),
        output.display()
    );

    Ok(())
}
