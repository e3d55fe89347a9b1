//! Calibration table parser.
//!
//! A calibration table links the three coordinate systems at fixed points
//! along one chromosome. Each line holds three numeric columns; blank lines
//! and `#` comments are skipped. The row whose cytological fraction is 0 is
//! the centromere.

use crate::coords::Dimension;
use crate::error::{CentromereSource, M2mcError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Column order of a calibration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnLayout {
    /// `genetic \t cytological \t physical`
    #[default]
    #[serde(alias = "genetic")]
    GeneticFirst,
    /// `cytological \t genetic \t physical` (legacy `cmrn` files)
    #[serde(alias = "cytological", alias = "cmrn")]
    CytologicalFirst,
}

impl FromStr for ColumnLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "genetic-first" | "genetic" => Ok(ColumnLayout::GeneticFirst),
            "cytological-first" | "cytological" | "cmrn" => Ok(ColumnLayout::CytologicalFirst),
            other => Err(format!("unknown column layout '{}'", other)),
        }
    }
}

impl fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLayout::GeneticFirst => write!(f, "genetic-first"),
            ColumnLayout::CytologicalFirst => write!(f, "cytological-first"),
        }
    }
}

/// One fixed point of the calibration table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRow {
    /// RN-cM genetic position
    pub genetic: f64,
    /// Fraction of arm length from the centromere
    pub cytological: f64,
    /// Micrometers from the short-arm tip
    pub physical: f64,
}

impl CalibrationRow {
    /// Create a row from its three coordinates.
    pub const fn new(genetic: f64, cytological: f64, physical: f64) -> Self {
        Self {
            genetic,
            cytological,
            physical,
        }
    }

    /// Value of this row in one dimension.
    #[inline]
    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Genetic => self.genetic,
            Dimension::Cytological => self.cytological,
            Dimension::Physical => self.physical,
        }
    }

    /// Whether this row is the centromere.
    #[inline]
    pub fn is_centromere(&self) -> bool {
        self.cytological == 0.0
    }
}

impl From<(f64, f64, f64)> for CalibrationRow {
    fn from((genetic, cytological, physical): (f64, f64, f64)) -> Self {
        Self::new(genetic, cytological, physical)
    }
}

/// Anchor values derived from a table with a centromere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationAnchors {
    /// Smallest genetic position in the table
    pub min_genetic: f64,
    /// Genetic position of the centromere row
    pub centromere_genetic: f64,
    /// Largest genetic position in the table
    pub max_genetic: f64,
    /// Cytological fraction of the centromere row (always 0)
    pub centromere_cytological: f64,
    /// Physical position of the centromere row
    pub centromere_physical: f64,
}

/// Per-chromosome calibration table.
///
/// Rows keep their on-disk order. The table is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    chromosome: String,
    rows: Vec<CalibrationRow>,
    centromere: Option<usize>,
}

impl CalibrationTable {
    /// Build a table from rows, locating the centromere.
    ///
    /// Fails with [`M2mcError::DuplicateCentromere`] if more than one row has
    /// a cytological fraction of 0. A table without a centromere is accepted
    /// here; [`CalibrationTable::anchors`] reports it.
    pub fn new(
        chromosome: impl Into<String>,
        rows: Vec<CalibrationRow>,
    ) -> Result<Self, M2mcError> {
        let mut centromere: Option<usize> = None;
        for (idx, row) in rows.iter().enumerate() {
            if row.is_centromere() {
                if let Some(first) = centromere {
                    return Err(M2mcError::DuplicateCentromere {
                        first_row: first + 1,
                        second_row: idx + 1,
                    });
                }
                centromere = Some(idx);
            }
        }

        let chromosome = chromosome.into();
        if rows
            .windows(2)
            .any(|pair| pair[1].genetic < pair[0].genetic)
        {
            log::warn!(
                "Calibration table for chromosome {} has decreasing genetic positions",
                chromosome
            );
        }

        Ok(Self {
            chromosome,
            rows,
            centromere,
        })
    }

    /// Load a table from a path (supports `.gz`).
    pub fn from_file<P: AsRef<Path>>(
        chromosome: impl Into<String>,
        path: P,
        layout: ColumnLayout,
    ) -> Result<Self, M2mcError> {
        let reader = crate::io::open_text(path)?;
        Self::parse(chromosome, reader, layout)
    }

    /// Parse a table from a reader.
    pub fn parse<R: Read>(
        chromosome: impl Into<String>,
        reader: R,
        layout: ColumnLayout,
    ) -> Result<Self, M2mcError> {
        let buf_reader = BufReader::new(reader);
        let mut rows = Vec::new();

        for (idx, line_result) in buf_reader.lines().enumerate() {
            let line_num = idx + 1;
            let line = line_result.map_err(|e| M2mcError::Io {
                msg: format!("Failed to read line {}: {}", line_num, e),
            })?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            rows.push(Self::parse_row(line, line_num, layout)?);
        }

        let table = Self::new(chromosome, rows)?;
        log::debug!(
            "Loaded calibration table for chromosome {}: {} rows",
            table.chromosome,
            table.len()
        );
        Ok(table)
    }

    /// Parse one data line.
    fn parse_row(
        line: &str,
        line_num: usize,
        layout: ColumnLayout,
    ) -> Result<CalibrationRow, M2mcError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(M2mcError::MalformedTable {
                line: line_num,
                msg: format!("expected 3 columns, got {}", parts.len()),
            });
        }

        let mut values = [0.0_f64; 3];
        for (slot, field) in values.iter_mut().zip(&parts[..3]) {
            *slot = field.parse::<f64>().map_err(|_| M2mcError::MalformedTable {
                line: line_num,
                msg: format!("'{}' is not a number", field),
            })?;
        }

        let [first, second, physical] = values;
        Ok(match layout {
            ColumnLayout::GeneticFirst => CalibrationRow::new(first, second, physical),
            ColumnLayout::CytologicalFirst => CalibrationRow::new(second, first, physical),
        })
    }

    /// Chromosome this table describes.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[CalibrationRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the centromere row, if the table has one.
    pub fn centromere_index(&self) -> Option<usize> {
        self.centromere
    }

    /// The centromere row.
    pub fn centromere(&self) -> Result<&CalibrationRow, M2mcError> {
        self.centromere
            .map(|idx| &self.rows[idx])
            .ok_or(M2mcError::MissingCentromere {
                location: CentromereSource::Table,
            })
    }

    /// Rows before the centromere.
    pub fn short_arm(&self) -> &[CalibrationRow] {
        match self.centromere {
            Some(idx) => &self.rows[..idx],
            None => &[],
        }
    }

    /// Rows after the centromere.
    pub fn long_arm(&self) -> &[CalibrationRow] {
        match self.centromere {
            Some(idx) => &self.rows[idx + 1..],
            None => &[],
        }
    }

    /// The column of one dimension, in table order.
    pub fn column(&self, dimension: Dimension) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(dimension)).collect()
    }

    /// Anchor scalars used by the rescaler.
    pub fn anchors(&self) -> Result<CalibrationAnchors, M2mcError> {
        let centromere = self.centromere()?;
        let (min_genetic, max_genetic) = self.rows.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), row| (lo.min(row.genetic), hi.max(row.genetic)),
        );

        Ok(CalibrationAnchors {
            min_genetic,
            centromere_genetic: centromere.genetic,
            max_genetic,
            centromere_cytological: centromere.cytological,
            centromere_physical: centromere.physical,
        })
    }
}
