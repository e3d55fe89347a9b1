//! Coordinate systems and arm classification
//!
//! Four coordinate systems describe a position on a maize chromosome:
//!
//! | System | Unit | Origin | Notes |
//! |--------|------|--------|-------|
//! | Genetic | cM | first mapped locus | user-supplied map |
//! | RN-cM | cM | calibration table | genetic column of the table |
//! | Physical | µm | tip of the short arm | synaptonemal complex length |
//! | Cytological | fraction of arm | centromere (0) | reported ×100 as cMC |
//!
//! Positions are plain `f64` values; [`Dimension`] names which column of a
//! calibration table a value belongs to.
//!
//! # Examples
//!
//! ```
//! use ferro_m2mc::coords::{fraction_to_cmc, cmc_to_fraction, Arm};
//!
//! assert_eq!(fraction_to_cmc(0.25), 25.0);
//! assert_eq!(cmc_to_fraction(25.0), 0.25);
//! assert_eq!(Arm::Short.code(), 'S');
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column of the calibration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// RN-cM genetic position
    Genetic,
    /// Fraction of arm length from the centromere
    Cytological,
    /// Micrometers from the short-arm tip
    Physical,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Genetic => write!(f, "RN-cM"),
            Dimension::Cytological => write!(f, "cMC"),
            Dimension::Physical => write!(f, "µm"),
        }
    }
}

/// Arm classification of a converted locus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arm {
    /// Short arm (before the centromere)
    Short,
    /// Long arm (after the centromere)
    Long,
    /// The centromere itself
    Centromere,
}

impl Arm {
    /// Single-letter code used in reports (`S`, `L`, `C`).
    pub fn code(self) -> char {
        match self {
            Arm::Short => 'S',
            Arm::Long => 'L',
            Arm::Centromere => 'C',
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which arm-specific interval test an arm-aware lookup applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArmMode {
    /// Source values decrease toward the centromere
    #[default]
    Short,
    /// Source values increase away from the centromere
    Long,
}

impl ArmMode {
    /// Arm label for a non-centromere locus converted in this mode.
    pub fn arm(self) -> Arm {
        match self {
            ArmMode::Short => Arm::Short,
            ArmMode::Long => Arm::Long,
        }
    }
}

/// Conversion direction of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Genetic map in, physical and cytological positions out
    GeneticToPhysical,
    /// Cytological map in, physical and genetic positions out
    CytologicalToGenetic,
}

impl Direction {
    /// Dimension of the positions the user supplies.
    pub fn input_dimension(self) -> Dimension {
        match self {
            Direction::GeneticToPhysical => Dimension::Genetic,
            Direction::CytologicalToGenetic => Dimension::Cytological,
        }
    }

    /// Dimension drawn as the converted map.
    pub fn target_dimension(self) -> Dimension {
        match self {
            Direction::GeneticToPhysical => Dimension::Cytological,
            Direction::CytologicalToGenetic => Dimension::Genetic,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parse the map type of the input.
    ///
    /// Accepts the map type (`genetic`, `cytological`) or the legacy
    /// numeric codes (`1`, `2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "genetic" | "gen" | "cm" | "1" => Ok(Direction::GeneticToPhysical),
            "cytological" | "cyto" | "cmc" | "2" => Ok(Direction::CytologicalToGenetic),
            other => Err(format!("unknown map type '{}'", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::GeneticToPhysical => write!(f, "genetic"),
            Direction::CytologicalToGenetic => write!(f, "cytological"),
        }
    }
}

/// Convert an arm fraction to centiMcClintocks.
#[inline]
pub fn fraction_to_cmc(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Convert centiMcClintocks to an arm fraction.
#[inline]
pub fn cmc_to_fraction(cmc: f64) -> f64 {
    cmc / 100.0
}

/// Normalize a cytological input position to an arm fraction.
///
/// Values above 1 are taken to be centiMcClintocks.
#[inline]
pub fn normalize_cytological(value: f64) -> f64 {
    if value > 1.0 {
        cmc_to_fraction(value)
    } else {
        value
    }
}
