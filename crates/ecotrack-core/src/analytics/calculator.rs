//! Emissions and offsets calculator
//!
//! Pure functions over [`MonthlyRecord`]s. The factor set is fixed at construction,
//! so the same records always produce bit-identical results.

use crate::factors::CarbonFactors;
use crate::models::{CarbonMetrics, MonthlyRecord, Sector, SectorEmission};

/// Round half-up on the cent digit (`-0.125` -> `-0.12`, `0.125` -> `0.13`)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Carbon calculator bound to one factor set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calculator {
    factors: CarbonFactors,
}

impl Calculator {
    pub fn new(factors: CarbonFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &CarbonFactors {
        &self.factors
    }

    /// Emissions of one sector for one record (kg CO₂)
    pub fn sector_emission_of(&self, record: &MonthlyRecord, sector: Sector) -> f64 {
        let f = &self.factors.emission;
        match sector {
            Sector::Electricity => record.electricity_kwh * f.electricity,
            Sector::Diesel => record.diesel_liters * f.diesel,
            Sector::Petrol => record.petrol_liters * f.petrol,
            Sector::Waste => record.waste_kg * f.waste,
            Sector::Water => record.water_liters * f.water,
        }
    }

    /// Total emissions of one record (kg CO₂, unrounded)
    pub fn emissions_of(&self, record: &MonthlyRecord) -> f64 {
        Sector::ALL
            .iter()
            .map(|&sector| self.sector_emission_of(record, sector))
            .sum()
    }

    /// Offsets of one record (kg CO₂, unrounded)
    ///
    /// Tree absorption is annual, so it is amortized over 12 months here.
    /// Callers must not divide again.
    pub fn offsets_of(&self, record: &MonthlyRecord) -> f64 {
        let f = &self.factors.offset;
        let tree_offset = (record.trees_planted as f64 * f.tree_per_year) / 12.0;
        let solar_offset = record.solar_units * f.solar_per_unit;
        tree_offset + solar_offset
    }

    /// Summary metrics over all records
    ///
    /// Neutrality is decided on the unrounded net; an empty slice is neutral.
    pub fn aggregate(&self, records: &[MonthlyRecord]) -> CarbonMetrics {
        let (total_emissions, total_offsets) =
            records.iter().fold((0.0, 0.0), |(emissions, offsets), r| {
                (emissions + self.emissions_of(r), offsets + self.offsets_of(r))
            });

        let net_footprint = total_emissions - total_offsets;

        CarbonMetrics {
            total_emissions: round_cents(total_emissions),
            total_offsets: round_cents(total_offsets),
            net_footprint: round_cents(net_footprint),
            is_neutral: net_footprint <= 0.0,
        }
    }

    /// Emissions per sector in fixed order (Electricity, Diesel, Petrol, Waste, Water)
    ///
    /// When nothing is emitted every percentage is 0.
    pub fn sector_breakdown(&self, records: &[MonthlyRecord]) -> Vec<SectorEmission> {
        let totals: Vec<(Sector, f64)> = Sector::ALL
            .iter()
            .map(|&sector| {
                let emission = records
                    .iter()
                    .map(|r| self.sector_emission_of(r, sector))
                    .sum::<f64>();
                (sector, emission)
            })
            .collect();

        let total: f64 = totals.iter().map(|(_, e)| e).sum();

        totals
            .into_iter()
            .map(|(sector, emission)| {
                let percentage = if total > 0.0 {
                    emission / total * 100.0
                } else {
                    0.0
                };
                SectorEmission {
                    sector,
                    emission: round_cents(emission),
                    percentage: round_cents(percentage),
                    color: sector.color().to_string(),
                }
            })
            .collect()
    }
}
