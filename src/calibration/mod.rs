//! Per-chromosome calibration data
//!
//! This module handles:
//! - Chromosome identifiers
//! - Calibration table parsing (plain or gzipped)
//! - Providers that resolve tables, reference maps and RN tracks

pub mod chromosome;
pub mod provider;
pub mod rn;
pub mod table;

pub use chromosome::{Chromosome, MAIZE_CHROMOSOMES};
pub use provider::{CalibrationProvider, DataDirProvider, InMemoryProvider, ReferenceMap};
pub use rn::{parse_rn_map, RnMeasure};
pub use table::{CalibrationAnchors, CalibrationRow, CalibrationTable, ColumnLayout};
