//! Simulation configuration
//!
//! All tunable parameters for a segregation run. Fractions are validated
//! against [0, 1] before any grid state is built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SchellingError};

/// Parameters for a segregation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid (cells per side)
    pub size: usize,

    /// Chebyshev radius of the neighborhood a resident considers
    pub neighborhood_radius: usize,

    /// Fraction of cells left vacant
    pub vacant_fraction: f64,

    /// Fraction of the non-vacant cells that are red (the rest are blue)
    pub red_fraction: f64,

    /// Minimum same-color neighbor fraction for a resident to be happy
    pub happiness_threshold: f64,

    /// Seed for the deterministic RNG
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 30,
            neighborhood_radius: 1,
            vacant_fraction: 0.2,
            red_fraction: 0.5,
            happiness_threshold: 0.3,
            seed: 12345,
        }
    }
}

impl SimConfig {
    /// Validate ranges before a simulation is built from this config.
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(SchellingError::InvalidDimension {
                name: "size",
                value: self.size,
            });
        }
        if self.neighborhood_radius < 1 {
            return Err(SchellingError::InvalidDimension {
                name: "neighborhood_radius",
                value: self.neighborhood_radius,
            });
        }
        check_fraction("vacant_fraction", self.vacant_fraction)?;
        check_fraction("red_fraction", self.red_fraction)?;
        check_fraction("happiness_threshold", self.happiness_threshold)?;
        Ok(())
    }

    /// Load a config from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

pub(crate) fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SchellingError::InvalidFraction { name, value });
    }
    Ok(())
}
