//! Named loci and the summary of a submitted map
//!
//! A locus is a name with a raw position in the input coordinate system.
//! The locus whose name starts with `cent` (any case) marks the centromere.

pub mod parse;

pub use parse::{parse_locus_list, parse_locus_str};

use crate::error::{CentromereSource, Diagnostic, ErrorCode, M2mcError};
use serde::{Deserialize, Serialize};

/// Name prefix that marks the centromere locus.
pub const CENTROMERE_PREFIX: &str = "cent";

/// Check whether a locus name marks the centromere.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::locus::is_centromere_name;
///
/// assert!(is_centromere_name("cent3"));
/// assert!(is_centromere_name("CENTROMERE"));
/// assert!(!is_centromere_name("bz1"));
/// assert!(!is_centromere_name("cen"));
/// ```
pub fn is_centromere_name(name: &str) -> bool {
    name.get(..CENTROMERE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CENTROMERE_PREFIX))
}

/// A named position in the input coordinate system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locus {
    /// Locus name as submitted
    pub name: String,
    /// Raw position (cM, or arm fraction for cytological maps)
    pub position: f64,
}

impl Locus {
    /// Create a locus.
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Whether this locus marks the centromere.
    pub fn is_centromere(&self) -> bool {
        is_centromere_name(&self.name)
    }
}

/// Where a locus list came from; decides the traversal order policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocusOrigin {
    /// Pasted or piped by the user
    #[default]
    Submitted,
    /// Read from a built-in reference map file
    ReferenceMap,
}

/// Anchors of the submitted map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputMapSummary {
    /// Smallest position, clamped to be at most 0
    pub min_coord: f64,
    /// Largest position
    pub max_coord: f64,
    /// Position of the centromere locus
    pub centromere_coord: f64,
}

impl InputMapSummary {
    /// Summarize a locus list.
    ///
    /// Fails with [`M2mcError::MissingCentromere`] when no locus name starts
    /// with `cent`. The first centromere locus in list order is used when
    /// there are several.
    pub fn from_loci(loci: &[Locus]) -> Result<Self, M2mcError> {
        if loci.is_empty() {
            return Err(M2mcError::malformed_with_diagnostic(
                0,
                "no loci submitted",
                Diagnostic::new()
                    .with_code(ErrorCode::EmptyLocusList)
                    .with_hint("supply one 'name<TAB>position' line per locus"),
            ));
        }

        if let Some((idx, locus)) = loci
            .iter()
            .enumerate()
            .find(|(_, locus)| !locus.position.is_finite())
        {
            return Err(M2mcError::malformed_with_diagnostic(
                idx + 1,
                format!("position of locus '{}' is {}", locus.name, locus.position),
                Diagnostic::new()
                    .with_code(ErrorCode::MalformedLocus)
                    .with_hint("positions must be finite numbers"),
            ));
        }

        let centromere_coord = loci
            .iter()
            .find(|locus| locus.is_centromere())
            .map(|locus| locus.position)
            .ok_or(M2mcError::MissingCentromere {
                location: CentromereSource::LocusList,
            })?;

        let (min_coord, max_coord) = loci.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), locus| (lo.min(locus.position), hi.max(locus.position)),
        );

        Ok(Self {
            min_coord: min_coord.min(0.0),
            max_coord,
            centromere_coord,
        })
    }

    /// Check that min, centromere and max are finite and strictly ordered.
    ///
    /// The anchor rescale divides by both arm lengths, so both must be
    /// non-zero.
    pub fn validate_anchors(&self) -> Result<(), M2mcError> {
        let anchors = [self.min_coord, self.centromere_coord, self.max_coord];
        let ordered =
            self.min_coord < self.centromere_coord && self.centromere_coord < self.max_coord;
        if !ordered || !anchors.iter().all(|a| a.is_finite()) {
            return Err(M2mcError::DegenerateAnchors {
                min: self.min_coord,
                centromere: self.centromere_coord,
                max: self.max_coord,
            });
        }
        Ok(())
    }
}

/// Order and normalize a locus list for conversion.
///
/// Genetic maps submitted by the user are stably sorted by position;
/// reference maps keep file order. Cytological maps keep traversal order and
/// have centiMcClintock values (above 1) converted to arm fractions.
pub fn prepare_loci(
    mut loci: Vec<Locus>,
    direction: crate::coords::Direction,
    origin: LocusOrigin,
) -> Vec<Locus> {
    use crate::coords::{normalize_cytological, Direction};

    match direction {
        Direction::GeneticToPhysical => {
            if origin == LocusOrigin::Submitted {
                loci.sort_by(|a, b| a.position.total_cmp(&b.position));
            }
        }
        Direction::CytologicalToGenetic => {
            for locus in &mut loci {
                locus.position = normalize_cytological(locus.position);
            }
        }
    }
    loci
}
