//! Calibration data providers
//!
//! A provider hands out one freshly loaded calibration table per request.
//! Nothing is cached between calls.

use super::chromosome::Chromosome;
use super::rn::{parse_rn_map, RnMeasure};
use super::table::{CalibrationRow, CalibrationTable, ColumnLayout};
use crate::error::M2mcError;
use crate::locus::{parse_locus_list, Locus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Built-in named genetic maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMap {
    /// UMC 1998 genetic map
    Umc98,
    /// Genetic map with artificial centromeres
    Genetic,
}

impl ReferenceMap {
    /// Path of this map for a chromosome, relative to the data root.
    pub fn relative_path(self, chromosome: Chromosome) -> PathBuf {
        match self {
            ReferenceMap::Umc98 => PathBuf::from("umc").join(format!("umc98{}", chromosome)),
            ReferenceMap::Genetic => PathBuf::from("gen").join(format!("gen{}", chromosome)),
        }
    }

    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            ReferenceMap::Umc98 => "UMC 98",
            ReferenceMap::Genetic => "Genetic map with artificial centromeres",
        }
    }
}

impl FromStr for ReferenceMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "umc98" | "umc" | "1" => Ok(ReferenceMap::Umc98),
            "genetic" | "gen" | "2" => Ok(ReferenceMap::Genetic),
            other => Err(format!("unknown reference map '{}'", other)),
        }
    }
}

impl fmt::Display for ReferenceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceMap::Umc98 => write!(f, "umc98"),
            ReferenceMap::Genetic => write!(f, "genetic"),
        }
    }
}

/// Source of calibration tables and reference maps
///
/// Implementations might include:
/// - DataDirProvider for the on-disk data layout
/// - InMemoryProvider for tests and embedders
pub trait CalibrationProvider {
    /// Load the calibration table for a chromosome.
    fn load_table(&self, chromosome: Chromosome) -> Result<CalibrationTable, M2mcError>;

    /// Load a built-in reference map as a locus list, in file order.
    ///
    /// The default implementation reports the map as unavailable.
    fn load_reference_map(
        &self,
        map: ReferenceMap,
        chromosome: Chromosome,
    ) -> Result<Vec<Locus>, M2mcError> {
        Err(M2mcError::DataUnavailable {
            chromosome: chromosome.to_string(),
            path: map.to_string(),
        })
    }

    /// Load the recombination nodule track of a chromosome.
    ///
    /// The default implementation reports the track as unavailable.
    fn load_rn_map(&self, chromosome: Chromosome) -> Result<Vec<RnMeasure>, M2mcError> {
        Err(M2mcError::DataUnavailable {
            chromosome: chromosome.to_string(),
            path: "rn".to_string(),
        })
    }
}

/// Provider backed by a data directory
///
/// Layout under the root:
/// - `cmrn/cmrn<n>` or `cmrn/cmrn<n>.gz`: calibration tables
/// - `umc/umc98<n>`: UMC 98 reference maps
/// - `gen/gen<n>`: genetic maps with artificial centromeres
/// - `rn/rn<n>`: recombination nodule tracks
#[derive(Debug, Clone)]
pub struct DataDirProvider {
    root: PathBuf,
    layout: ColumnLayout,
}

impl DataDirProvider {
    /// Create a provider rooted at a directory.
    pub fn new(root: impl Into<PathBuf>, layout: ColumnLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Data directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Column layout of the calibration files.
    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Locate the calibration file for a chromosome.
    ///
    /// The plain file is preferred over the `.gz` one.
    pub fn table_path(&self, chromosome: Chromosome) -> Option<PathBuf> {
        let plain = self.root.join("cmrn").join(format!("cmrn{}", chromosome));
        let gz = plain.with_file_name(format!("cmrn{}.gz", chromosome));
        [plain, gz].into_iter().find(|p| p.is_file())
    }
}

impl CalibrationProvider for DataDirProvider {
    fn load_table(&self, chromosome: Chromosome) -> Result<CalibrationTable, M2mcError> {
        let path = self
            .table_path(chromosome)
            .ok_or_else(|| M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: self
                    .root
                    .join("cmrn")
                    .join(format!("cmrn{}", chromosome))
                    .display()
                    .to_string(),
            })?;

        log::debug!("Reading calibration table {}", path.display());
        CalibrationTable::from_file(chromosome.to_string(), &path, self.layout)
    }

    fn load_reference_map(
        &self,
        map: ReferenceMap,
        chromosome: Chromosome,
    ) -> Result<Vec<Locus>, M2mcError> {
        let path = self.root.join(map.relative_path(chromosome));
        if !path.is_file() {
            return Err(M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: path.display().to_string(),
            });
        }

        log::debug!("Reading {} reference map {}", map.label(), path.display());
        parse_locus_list(crate::io::open_text(&path)?)
    }

    fn load_rn_map(&self, chromosome: Chromosome) -> Result<Vec<RnMeasure>, M2mcError> {
        let path = self.root.join("rn").join(format!("rn{}", chromosome));
        if !path.is_file() {
            return Err(M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: path.display().to_string(),
            });
        }

        log::debug!("Reading RN track {}", path.display());
        parse_rn_map(crate::io::open_text(&path)?)
    }
}

/// In-memory provider for testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    tables: HashMap<Chromosome, Vec<CalibrationRow>>,
    maps: HashMap<(ReferenceMap, Chromosome), Vec<Locus>>,
    rn_maps: HashMap<Chromosome, Vec<RnMeasure>>,
}

impl InMemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add calibration rows for a chromosome
    pub fn add_table(&mut self, chromosome: Chromosome, rows: Vec<CalibrationRow>) {
        self.tables.insert(chromosome, rows);
    }

    /// Add a reference map for a chromosome
    pub fn add_reference_map(
        &mut self,
        map: ReferenceMap,
        chromosome: Chromosome,
        loci: Vec<Locus>,
    ) {
        self.maps.insert((map, chromosome), loci);
    }

    /// Add an RN track for a chromosome
    pub fn add_rn_map(&mut self, chromosome: Chromosome, measures: Vec<RnMeasure>) {
        self.rn_maps.insert(chromosome, measures);
    }

    /// Builder form of [`InMemoryProvider::add_table`]
    pub fn with_table(mut self, chromosome: Chromosome, rows: Vec<CalibrationRow>) -> Self {
        self.add_table(chromosome, rows);
        self
    }

    /// Number of chromosomes with a table
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl CalibrationProvider for InMemoryProvider {
    fn load_table(&self, chromosome: Chromosome) -> Result<CalibrationTable, M2mcError> {
        let rows = self
            .tables
            .get(&chromosome)
            .ok_or_else(|| M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: "<memory>".to_string(),
            })?;
        CalibrationTable::new(chromosome.to_string(), rows.clone())
    }

    fn load_reference_map(
        &self,
        map: ReferenceMap,
        chromosome: Chromosome,
    ) -> Result<Vec<Locus>, M2mcError> {
        self.maps
            .get(&(map, chromosome))
            .cloned()
            .ok_or_else(|| M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: map.to_string(),
            })
    }

    fn load_rn_map(&self, chromosome: Chromosome) -> Result<Vec<RnMeasure>, M2mcError> {
        self.rn_maps
            .get(&chromosome)
            .cloned()
            .ok_or_else(|| M2mcError::DataUnavailable {
                chromosome: chromosome.to_string(),
                path: "rn".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr(n: u8) -> Chromosome {
        Chromosome::new(n).unwrap()
    }

    #[test]
    fn test_reference_map_paths() {
        assert_eq!(
            ReferenceMap::Umc98.relative_path(chr(10)),
            PathBuf::from("umc/umc9810")
        );
        assert_eq!(
            ReferenceMap::Genetic.relative_path(chr(3)),
            PathBuf::from("gen/gen3")
        );
    }

    #[test]
    fn test_reference_map_from_str() {
        assert_eq!("UMC98".parse::<ReferenceMap>().unwrap(), ReferenceMap::Umc98);
        assert_eq!("2".parse::<ReferenceMap>().unwrap(), ReferenceMap::Genetic);
        assert!("rn".parse::<ReferenceMap>().is_err());
    }

    #[test]
    fn test_in_memory_provider() {
        let provider = InMemoryProvider::new().with_table(
            chr(1),
            vec![
                CalibrationRow::new(0.0, -1.0, 0.0),
                CalibrationRow::new(50.0, 0.0, 10.0),
            ],
        );
        assert_eq!(provider.table_count(), 1);
        assert_eq!(provider.load_table(chr(1)).unwrap().len(), 2);
        assert!(matches!(
            provider.load_table(chr(2)),
            Err(M2mcError::DataUnavailable { .. })
        ));
        assert!(matches!(
            provider.load_reference_map(ReferenceMap::Umc98, chr(1)),
            Err(M2mcError::DataUnavailable { .. })
        ));
        assert!(matches!(
            provider.load_rn_map(chr(1)),
            Err(M2mcError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_in_memory_rn_map() {
        let mut provider = InMemoryProvider::new();
        let measures = vec![RnMeasure {
            label: "1".to_string(),
            position: 3.0,
            frequency: 0.5,
        }];
        provider.add_rn_map(chr(2), measures.clone());
        assert_eq!(provider.load_rn_map(chr(2)).unwrap(), measures);
    }

    #[test]
    fn test_data_dir_provider_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DataDirProvider::new(dir.path(), ColumnLayout::GeneticFirst);
        let err = provider.load_table(chr(4)).unwrap_err();
        match err {
            M2mcError::DataUnavailable { chromosome, path } => {
                assert_eq!(chromosome, "4");
                assert!(path.ends_with("cmrn4"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
