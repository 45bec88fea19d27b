//! Unit tests for analytics module

use super::*;
use crate::factors::CarbonFactors;
use crate::models::{Month, MonthlyRecord, Sector};

const EPS: f64 = 1e-9;

fn record(id: &str, month: Month, year: i32) -> MonthlyRecord {
    MonthlyRecord::empty(id, "user-1", month, year)
}

/// Records spread over `months` consecutive months starting in Jan 2024
fn generate_test_records(count: usize, months: usize) -> Vec<MonthlyRecord> {
    (0..count)
        .map(|i| {
            let month = Month::ALL[i % months.min(12)];
            let mut r = record(&format!("rec-{}", i), month, 2024);
            r.electricity_kwh = 1000.0 + i as f64 * 10.0;
            r.diesel_liters = 50.0;
            r.petrol_liters = 20.0;
            r.waste_kg = 200.0;
            r.water_liters = 10_000.0;
            r.solar_units = 100.0;
            r.trees_planted = 12;
            r
        })
        .collect()
}

// ============================================================================
// Calculator Tests
// ============================================================================

#[test]
fn test_zero_record_has_no_emissions_or_offsets() {
    let calc = Calculator::default();
    let r = record("zero", Month::Jan, 2024);

    assert_eq!(calc.emissions_of(&r), 0.0);
    assert_eq!(calc.offsets_of(&r), 0.0);
}

#[test]
fn test_electricity_only_emissions() {
    let calc = Calculator::default();
    let mut r = record("elec", Month::Jan, 2024);
    r.electricity_kwh = 100.0;

    assert!((calc.emissions_of(&r) - 82.0).abs() < EPS);
    assert_eq!(calc.aggregate(&[r]).total_emissions, 82.0);
}

#[test]
fn test_emissions_weighted_sum_of_all_sources() {
    let calc = Calculator::default();
    let mut r = record("all", Month::Jan, 2024);
    r.electricity_kwh = 10.0; // 8.2
    r.diesel_liters = 10.0; // 26.8
    r.petrol_liters = 10.0; // 23.1
    r.waste_kg = 10.0; // 5.0
    r.water_liters = 10_000.0; // 3.0

    assert!((calc.emissions_of(&r) - 66.1).abs() < EPS);
}

#[test]
fn test_tree_offsets_amortized_monthly() {
    let calc = Calculator::default();
    let mut r = record("trees", Month::Jan, 2024);
    r.trees_planted = 120;

    assert_eq!(calc.offsets_of(&r), 210.0);
}

#[test]
fn test_solar_offsets() {
    let calc = Calculator::default();
    let mut r = record("solar", Month::Jan, 2024);
    r.solar_units = 100.0;

    assert!((calc.offsets_of(&r) - 82.0).abs() < EPS);
}

#[test]
fn test_aggregate_empty_is_neutral() {
    let metrics = Calculator::default().aggregate(&[]);

    assert_eq!(metrics.total_emissions, 0.0);
    assert_eq!(metrics.total_offsets, 0.0);
    assert_eq!(metrics.net_footprint, 0.0);
    assert!(metrics.is_neutral);
}

#[test]
fn test_aggregate_two_records() {
    // waste factor 0.5 and solar factor 1.0 give round numbers
    let mut factors = CarbonFactors::default();
    factors.offset.solar_per_unit = 1.0;
    let calc = Calculator::new(factors);

    let mut a = record("a", Month::Jan, 2024);
    a.waste_kg = 200.0; // 100
    a.solar_units = 30.0;
    let mut b = record("b", Month::Feb, 2024);
    b.waste_kg = 100.0; // 50
    b.solar_units = 10.0;

    let metrics = calc.aggregate(&[a, b]);
    assert_eq!(metrics.total_emissions, 150.0);
    assert_eq!(metrics.total_offsets, 40.0);
    assert_eq!(metrics.net_footprint, 110.0);
    assert!(!metrics.is_neutral);
}

#[test]
fn test_aggregate_equal_emissions_and_offsets_is_neutral() {
    let mut factors = CarbonFactors::default();
    factors.offset.solar_per_unit = 0.5;
    let calc = Calculator::new(factors);

    let mut r = record("even", Month::Jan, 2024);
    r.waste_kg = 100.0; // 50
    r.solar_units = 100.0; // 50

    let metrics = calc.aggregate(&[r]);
    assert_eq!(metrics.net_footprint, 0.0);
    assert!(metrics.is_neutral);
}

#[test]
fn test_aggregate_rounds_to_cents() {
    let calc = Calculator::default();
    let mut r = record("water", Month::Jan, 2024);
    r.water_liters = 12_345.0; // 3.7035

    let metrics = calc.aggregate(&[r]);
    assert_eq!(metrics.total_emissions, 3.7);
}

#[test]
fn test_sector_breakdown_empty_has_zero_percentages() {
    let sectors = Calculator::default().sector_breakdown(&[]);

    assert_eq!(sectors.len(), 5);
    for s in &sectors {
        assert_eq!(s.emission, 0.0);
        assert_eq!(s.percentage, 0.0);
        assert!(!s.percentage.is_nan());
    }
}

#[test]
fn test_sector_breakdown_all_zero_records() {
    let records = vec![record("a", Month::Jan, 2024), record("b", Month::Feb, 2024)];
    let sectors = Calculator::default().sector_breakdown(&records);

    assert!(sectors.iter().all(|s| s.percentage == 0.0));
}

#[test]
fn test_sector_breakdown_fixed_order_and_colors() {
    let records = generate_test_records(4, 4);
    let sectors = Calculator::default().sector_breakdown(&records);

    let order: Vec<Sector> = sectors.iter().map(|s| s.sector).collect();
    assert_eq!(order, Sector::ALL.to_vec());
    assert_eq!(sectors[0].color, "hsl(152, 45%, 28%)");
    assert_eq!(sectors[4].color, "hsl(200, 80%, 50%)");
}

#[test]
fn test_sector_breakdown_percentages_sum_to_100() {
    let records = generate_test_records(12, 12);
    let sectors = Calculator::default().sector_breakdown(&records);

    let sum: f64 = sectors.iter().map(|s| s.percentage).sum();
    assert!(
        (sum - 100.0).abs() < 0.05,
        "Percentages should sum to ~100, got {}",
        sum
    );
}

#[test]
fn test_sector_breakdown_single_source_is_100_percent() {
    let mut r = record("diesel", Month::Jan, 2024);
    r.diesel_liters = 10.0;

    let sectors = Calculator::default().sector_breakdown(&[r]);
    let diesel = &sectors[1];
    assert_eq!(diesel.sector, Sector::Diesel);
    assert_eq!(diesel.emission, 26.8);
    assert_eq!(diesel.percentage, 100.0);
    assert_eq!(sectors[0].percentage, 0.0);
}

// ============================================================================
// Trends Tests
// ============================================================================

#[test]
fn test_trends_empty_records() {
    let trends = Calculator::default().monthly_trends(&[], TrendGrouping::default());
    assert!(trends.is_empty());
}

#[test]
fn test_trends_ordered_by_calendar_month() {
    let mut records = Vec::new();
    for (i, month) in [Month::Dec, Month::Mar, Month::Jan, Month::Jul].iter().enumerate() {
        let mut r = record(&format!("rec-{}", i), *month, 2024);
        r.electricity_kwh = 100.0;
        records.push(r);
    }

    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);
    let months: Vec<Month> = trends.iter().map(|t| t.month).collect();
    assert_eq!(months, vec![Month::Jan, Month::Mar, Month::Jul, Month::Dec]);
}

#[test]
fn test_trends_only_months_present() {
    let records = vec![record("a", Month::Feb, 2024), record("b", Month::Feb, 2024)];
    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);

    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].month, Month::Feb);
    assert_eq!(trends[0].year, Some(2024));
}

#[test]
fn test_trends_accumulate_within_group() {
    let mut a = record("a", Month::May, 2024);
    a.electricity_kwh = 100.0; // 82
    a.trees_planted = 12; // 21
    let mut b = record("b", Month::May, 2024);
    b.electricity_kwh = 50.0; // 41

    let trends = Calculator::default().monthly_trends(&[a, b], TrendGrouping::MonthAndYear);
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].emissions, 123.0);
    assert_eq!(trends[0].offsets, 21.0);
    assert_eq!(trends[0].net, 102.0);
}

#[test]
fn test_trends_grouping_policies_are_distinguishable() {
    let mut jan_2023 = record("a", Month::Jan, 2023);
    jan_2023.electricity_kwh = 100.0;
    let mut jan_2024 = record("b", Month::Jan, 2024);
    jan_2024.electricity_kwh = 200.0;
    let records = vec![jan_2024, jan_2023];
    let calc = Calculator::default();

    let by_year = calc.monthly_trends(&records, TrendGrouping::MonthAndYear);
    assert_eq!(by_year.len(), 2);
    assert_eq!(by_year[0].year, Some(2023));
    assert_eq!(by_year[1].year, Some(2024));
    assert_eq!(by_year[0].label(), "Jan 2023");

    let merged = calc.monthly_trends(&records, TrendGrouping::MonthOnly);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].year, None);
    assert_eq!(merged[0].emissions, 246.0);
    assert_eq!(merged[0].label(), "Jan");
}

#[test]
fn test_calculator_is_deterministic() {
    let records = generate_test_records(30, 12);
    let calc = Calculator::default();

    assert_eq!(calc.aggregate(&records), calc.aggregate(&records));
    assert_eq!(calc.sector_breakdown(&records), calc.sector_breakdown(&records));
    assert_eq!(
        calc.monthly_trends(&records, TrendGrouping::MonthAndYear),
        calc.monthly_trends(&records, TrendGrouping::MonthAndYear)
    );
    for r in &records {
        assert_eq!(
            calc.emissions_of(r).to_bits(),
            calc.emissions_of(r).to_bits()
        );
    }
}

// ============================================================================
// Forecast Tests
// ============================================================================

#[test]
fn test_predict_insufficient_data() {
    assert!(predict(&[]).is_empty());
    assert!(predict(&[5.0]).is_empty());
}

#[test]
fn test_predict_linear_increase() {
    let predictions = predict(&[10.0, 20.0, 30.0]);
    assert_eq!(predictions, vec![40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
}

#[test]
fn test_predict_decreasing_clamps_at_zero() {
    let predictions = predict(&[30.0, 20.0, 10.0]);

    assert_eq!(predictions.len(), FORECAST_HORIZON);
    assert!(predictions.iter().all(|&p| p >= 0.0));
    assert_eq!(predictions, vec![0.0; 6]);
}

#[test]
fn test_predict_partial_clamp() {
    // slope -10, intercept 100 → x=5..10: 50, 40, 30, 20, 10, 0
    let predictions = predict(&[100.0, 90.0, 80.0, 70.0, 60.0]);
    assert_eq!(predictions, vec![50.0, 40.0, 30.0, 20.0, 10.0, 0.0]);
}

#[test]
fn test_predict_constant_series() {
    let predictions = predict(&[42.0, 42.0]);
    assert_eq!(predictions, vec![42.0; 6]);
}

#[test]
fn test_forecast_unavailable_below_two_months() {
    let records = generate_test_records(3, 1);
    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);
    let forecast = forecast_emissions(&trends);

    assert!(!forecast.is_available());
    assert!(forecast.predictions.is_empty());
}

#[test]
fn test_forecast_fit_and_summary() {
    let trends: Vec<MonthlyTrend> = [10.0, 20.0, 30.0]
        .iter()
        .zip([Month::Jan, Month::Feb, Month::Mar])
        .map(|(&emissions, month)| MonthlyTrend {
            month,
            year: Some(2024),
            emissions,
            offsets: 0.0,
            net: emissions,
        })
        .collect();

    let forecast = forecast_emissions(&trends);
    assert!(forecast.is_available());
    assert_eq!(forecast.slope, 10.0);
    assert_eq!(forecast.intercept, 10.0);
    assert_eq!(forecast.average_prediction, 65.0);
    // (10 - 65) / 10 * 100
    assert!((forecast.projected_reduction_pct + 550.0).abs() < EPS);
    assert!(matches!(forecast.trend_direction, TrendDirection::Up(_)));
}

#[test]
fn test_forecast_stable_trend() {
    let mut records = Vec::new();
    for (i, month) in Month::ALL.iter().take(6).enumerate() {
        let mut r = record(&format!("rec-{}", i), *month, 2024);
        r.electricity_kwh = 1000.0;
        records.push(r);
    }

    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);
    let forecast = forecast_emissions(&trends);

    assert!(matches!(forecast.trend_direction, TrendDirection::Stable));
}

#[test]
fn test_forecast_decreasing_trend() {
    let mut records = Vec::new();
    for (i, month) in Month::ALL.iter().take(6).enumerate() {
        let mut r = record(&format!("rec-{}", i), *month, 2024);
        r.diesel_liters = 600.0 - i as f64 * 100.0;
        records.push(r);
    }

    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);
    let forecast = forecast_emissions(&trends);

    assert!(
        matches!(forecast.trend_direction, TrendDirection::Down(_)),
        "Should detect decreasing trend, got {:?}",
        forecast.trend_direction
    );
    assert!(forecast.predictions.iter().all(|&p| p >= 0.0));
}

#[test]
fn test_forecast_across_year_boundary_uses_chronological_order() {
    // Nov 2023 .. Feb 2024 rising by 100 kg per month
    let periods = [
        (Month::Nov, 2023),
        (Month::Dec, 2023),
        (Month::Jan, 2024),
        (Month::Feb, 2024),
    ];
    let records: Vec<MonthlyRecord> = periods
        .iter()
        .enumerate()
        .map(|(i, &(month, year))| {
            let mut r = record(&format!("rec-{}", i), month, year);
            r.waste_kg = 200.0 * (i + 1) as f64;
            r
        })
        .collect();

    let trends = Calculator::default().monthly_trends(&records, TrendGrouping::MonthAndYear);
    let labels: Vec<String> = trends.iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["Jan 2024", "Feb 2024", "Nov 2023", "Dec 2023"]);

    let forecast = forecast_emissions(&trends);
    assert_eq!(forecast.slope, 100.0);
    assert_eq!(forecast.intercept, 100.0);
    assert_eq!(
        forecast.predictions,
        vec![500.0, 600.0, 700.0, 800.0, 900.0, 1000.0]
    );
    assert!(matches!(forecast.trend_direction, TrendDirection::Up(_)));

    let insights = generate_insights(
        &Calculator::default().aggregate(&records),
        &Calculator::default().sector_breakdown(&records),
        &forecast,
    );
    assert!(insights.iter().any(|i| i.starts_with("Emissions trending up")));
}

// ============================================================================
// Insights Tests
// ============================================================================

#[test]
fn test_insights_report_top_emitter() {
    let mut r = record("a", Month::Jan, 2024);
    r.diesel_liters = 100.0;
    r.electricity_kwh = 10.0;
    let calc = Calculator::default();
    let records = vec![r];

    let metrics = calc.aggregate(&records);
    let sectors = calc.sector_breakdown(&records);
    let forecast = ForecastData::unavailable("Insufficient data (<2 months)");
    let insights = generate_insights(&metrics, &sectors, &forecast);

    assert!(insights[0].starts_with("Diesel is the largest emission source"));
    assert!(insights.iter().any(|i| i.starts_with("Net footprint")));
    assert!(insights.iter().any(|i| i.contains("Forecast unavailable")));
}

#[test]
fn test_insights_neutral_without_emissions() {
    let metrics = Calculator::default().aggregate(&[]);
    let sectors = Calculator::default().sector_breakdown(&[]);
    let forecast = ForecastData::unavailable("Insufficient data (<2 months)");

    let insights = generate_insights(&metrics, &sectors, &forecast);
    assert!(
        !insights.iter().any(|i| i.contains("largest emission source")),
        "No top emitter when nothing is emitted"
    );
    assert!(insights
        .iter()
        .any(|i| i == "Carbon neutral: offsets exceed emissions by 0.00 kg CO₂."));
}

// ============================================================================
// Integration Test
// ============================================================================

#[test]
fn test_full_report_pipeline() {
    let records = generate_test_records(24, 12);
    let calc = Calculator::default();

    let report = CarbonReport::compute(&calc, &records, TrendGrouping::MonthAndYear);

    assert_eq!(report.record_count, 24);
    assert_eq!(report.sectors.len(), 5);
    assert_eq!(report.trends.len(), 12);
    assert_eq!(report.forecast.predictions.len(), FORECAST_HORIZON);
    assert!(!report.insights.is_empty());
    assert_eq!(report.metrics, calc.aggregate(&records));
    assert_eq!(report.grouping, TrendGrouping::MonthAndYear);
}
