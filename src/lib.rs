// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-m2mc: maize locus coordinate converter
//!
//! Part of the ferro bioinformatics toolkit. Converts named loci between
//! genetic distance (cM), the RN-cM reference scale, physical distance along
//! the synaptonemal complex (µm from the short-arm tip) and cytological arm
//! fraction (centiMcClintocks).
//!
//! # Example
//!
//! ```
//! use ferro_m2mc::{CalibrationRow, CalibrationTable, Direction, Locus, LocusBatchConverter};
//!
//! let table = CalibrationTable::new("1", vec![
//!     CalibrationRow::new(0.0, -1.0, 0.0),
//!     CalibrationRow::new(50.0, 0.0, 10.0),
//!     CalibrationRow::new(100.0, 1.0, 20.0),
//! ]).unwrap();
//!
//! let loci = vec![
//!     Locus::new("bz1", 25.0),
//!     Locus::new("cent1", 50.0),
//!     Locus::new("sh1", 75.0),
//! ];
//!
//! let report = LocusBatchConverter::new(&table)
//!     .convert(&loci, Direction::GeneticToPhysical)
//!     .unwrap();
//! assert_eq!(report.results[1].physical_position, 10.0);
//! ```

pub mod calibration;
pub mod cli;
pub mod config;
pub mod convert;
pub mod coords;
pub mod error;
pub mod export;
pub mod io;
pub mod locus;
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export commonly used types
pub use calibration::{
    CalibrationAnchors, CalibrationProvider, CalibrationRow, CalibrationTable, Chromosome,
    ColumnLayout, DataDirProvider, InMemoryProvider, ReferenceMap,
};
pub use convert::{
    convert_request, rescale, AnchorRescaler, ArmAwareLookup, ConversionReport,
    ConversionRequest, ConversionResult, LocusBatchConverter, LocusSource,
};
pub use coords::{Arm, ArmMode, Dimension, Direction};
pub use error::M2mcError;
pub use locus::{parse_locus_list, parse_locus_str, InputMapSummary, Locus};

/// Result type alias for ferro-m2mc operations
pub type Result<T> = std::result::Result<T, M2mcError>;
