//! Emission and offset factors
//!
//! Built-in constants can be overridden from `~/.config/ecotrack/factors.toml`
//! (or any file passed explicitly). Every key is optional:
//!
//! ```toml
//! [emission]
//! electricity = 0.82   # kg CO₂ per kWh
//! diesel = 2.68        # kg CO₂ per liter
//!
//! [offset]
//! tree_per_year = 21.0 # kg CO₂ absorbed per tree per year
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// kg CO₂ emitted per unit of input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionFactors {
    /// per kWh
    pub electricity: f64,
    /// per liter
    pub diesel: f64,
    /// per liter
    pub petrol: f64,
    /// per kg
    pub waste: f64,
    /// per liter
    pub water: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            electricity: 0.82,
            diesel: 2.68,
            petrol: 2.31,
            waste: 0.5,
            water: 0.0003,
        }
    }
}

/// kg CO₂ absorbed or avoided
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OffsetFactors {
    /// Absorption of one tree over a full year (amortized /12 per month)
    pub tree_per_year: f64,
    /// Per generated solar unit (grid-electricity equivalent)
    pub solar_per_unit: f64,
}

impl Default for OffsetFactors {
    fn default() -> Self {
        Self {
            tree_per_year: 21.0,
            solar_per_unit: 0.82,
        }
    }
}

/// Immutable factor set handed to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarbonFactors {
    pub emission: EmissionFactors,
    pub offset: OffsetFactors,
}

impl CarbonFactors {
    /// Default location: `<config_dir>/ecotrack/factors.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ecotrack").join("factors.toml"))
    }

    /// Parse TOML content; `path` is only used for error reporting
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, CoreError> {
        let factors: CarbonFactors =
            toml::from_str(content).map_err(|source| CoreError::TomlParse {
                path: path.to_path_buf(),
                message: source.message().to_string(),
                source,
            })?;
        factors.validate()?;
        Ok(factors)
    }

    /// Load factors from a TOML file
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let factors = Self::from_toml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "Loaded carbon factors");
        Ok(factors)
    }

    /// Resolve factors for a run
    ///
    /// An explicit path must exist. Without one, the default config file is used
    /// when present, otherwise the built-in constants.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("No factors file found, using built-in constants");
                Ok(Self::default())
            }
        }
    }

    /// Reject negative or non-finite factors
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("emission.electricity", self.emission.electricity),
            ("emission.diesel", self.emission.diesel),
            ("emission.petrol", self.emission.petrol),
            ("emission.waste", self.emission.waste),
            ("emission.water", self.emission.water),
            ("offset.tree_per_year", self.offset.tree_per_year),
            ("offset.solar_per_unit", self.offset.solar_per_unit),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig {
                    message: format!("{} must be a non-negative number, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}
