//! Batch conversion of locus lists
//!
//! The converter classifies each locus by arm, rescales or looks it up, and
//! collects one [`ConversionResult`] per locus. Any failed precondition
//! aborts the whole batch before the first locus is converted.

use super::lookup::ArmAwareLookup;
use super::rescale::AnchorRescaler;
use crate::calibration::{
    CalibrationAnchors, CalibrationProvider, CalibrationTable, Chromosome, ReferenceMap,
};
use crate::coords::{Arm, ArmMode, Direction};
use crate::error::M2mcError;
use crate::locus::{prepare_loci, InputMapSummary, Locus, LocusOrigin};
use serde::{Deserialize, Serialize};

/// Converted coordinates of one locus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Locus name as submitted
    pub name: String,
    /// Position in the input coordinate system
    pub source_position: f64,
    /// Position on the RN-cM scale
    pub rn_position: f64,
    /// Micrometers from the short-arm tip
    pub physical_position: f64,
    /// Fraction of arm length from the centromere
    pub cytological_fraction: f64,
    pub arm: Arm,
    /// Position as a fraction of the submitted map arm (genetic input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_fraction: Option<f64>,
    /// RN-cM position multiplied by the conversion factor (cytological input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_genetic: Option<f64>,
}

impl ConversionResult {
    /// Arm fraction, negated on the short arm.
    pub fn signed_cytological(&self) -> f64 {
        match self.arm {
            Arm::Short => -self.cytological_fraction,
            Arm::Long | Arm::Centromere => self.cytological_fraction,
        }
    }

    /// Position in the output coordinate system of a direction.
    pub fn target_position(&self, direction: Direction) -> f64 {
        match direction {
            Direction::GeneticToPhysical => self.signed_cytological(),
            Direction::CytologicalToGenetic => self.rn_position,
        }
    }
}

/// Extent of a converted map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromosomeSpan {
    pub start: f64,
    pub end: f64,
}

/// Results of one conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub chromosome: String,
    pub direction: Direction,
    /// Conversion factor applied to genetic output (1 in the genetic direction)
    pub factor: f64,
    pub summary: InputMapSummary,
    pub anchors: CalibrationAnchors,
    pub results: Vec<ConversionResult>,
}

impl ConversionReport {
    /// Span of the observed target positions, or None for an empty report.
    pub fn chromosome_span(&self) -> Option<ChromosomeSpan> {
        self.results
            .iter()
            .map(|r| r.target_position(self.direction))
            .fold(None, |span, pos| match span {
                None => Some(ChromosomeSpan {
                    start: pos,
                    end: pos,
                }),
                Some(s) => Some(ChromosomeSpan {
                    start: s.start.min(pos),
                    end: s.end.max(pos),
                }),
            })
    }

    /// Span of the submitted positions, or None for an empty report.
    pub fn input_span(&self) -> Option<ChromosomeSpan> {
        let mut positions = self.results.iter().map(|r| r.source_position);
        let first = positions.next()?;
        Some(positions.fold(
            ChromosomeSpan {
                start: first,
                end: first,
            },
            |s, pos| ChromosomeSpan {
                start: s.start.min(pos),
                end: s.end.max(pos),
            },
        ))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Normalize a display conversion factor; factors at or below 0 become 1.
pub fn effective_factor(factor: f64) -> f64 {
    if factor > 0.0 {
        factor
    } else {
        1.0
    }
}

/// Converts locus lists against one calibration table.
#[derive(Debug, Clone, Copy)]
pub struct LocusBatchConverter<'a> {
    table: &'a CalibrationTable,
    factor: f64,
}

impl<'a> LocusBatchConverter<'a> {
    pub fn new(table: &'a CalibrationTable) -> Self {
        Self { table, factor: 1.0 }
    }

    /// Set the conversion factor for the cytological direction.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = effective_factor(factor);
        self
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Convert an already ordered locus list.
    ///
    /// See [`prepare_loci`] for the ordering and normalization applied to
    /// raw input.
    pub fn convert(
        &self,
        loci: &[Locus],
        direction: Direction,
    ) -> Result<ConversionReport, M2mcError> {
        let anchors = self.table.anchors()?;
        let summary = InputMapSummary::from_loci(loci)?;

        let results = match direction {
            Direction::GeneticToPhysical => {
                summary.validate_anchors()?;
                self.convert_genetic(loci, &summary, &anchors)
            }
            Direction::CytologicalToGenetic => self.convert_cytological(loci, &anchors),
        };

        log::debug!(
            "Converted {} loci on chromosome {} ({} input)",
            results.len(),
            self.table.chromosome(),
            direction
        );

        Ok(ConversionReport {
            chromosome: self.table.chromosome().to_string(),
            direction,
            factor: match direction {
                Direction::GeneticToPhysical => 1.0,
                Direction::CytologicalToGenetic => self.factor,
            },
            summary,
            anchors,
            results,
        })
    }

    fn convert_genetic(
        &self,
        loci: &[Locus],
        summary: &InputMapSummary,
        anchors: &CalibrationAnchors,
    ) -> Vec<ConversionResult> {
        let rescaler = AnchorRescaler::from_summary(summary, anchors);
        let lookup = ArmAwareLookup::new(self.table);

        loci.iter()
            .map(|locus| {
                let rescaled = rescaler.rescale(locus.position);

                let (arm, rn_position, physical_position, cytological_fraction) =
                    if locus.is_centromere() {
                        (
                            Arm::Centromere,
                            anchors.centromere_genetic,
                            anchors.centromere_physical,
                            anchors.centromere_cytological,
                        )
                    } else {
                        let arm = if locus.position < summary.centromere_coord {
                            Arm::Short
                        } else {
                            Arm::Long
                        };
                        (
                            arm,
                            rescaled.rn_position,
                            lookup.cm_to_physical(rescaled.rn_position),
                            lookup.cm_to_cytological(rescaled.rn_position),
                        )
                    };

                ConversionResult {
                    name: locus.name.clone(),
                    source_position: locus.position,
                    rn_position,
                    physical_position,
                    cytological_fraction,
                    arm,
                    arm_fraction: Some(rescaled.fraction),
                    scaled_genetic: None,
                }
            })
            .collect()
    }

    fn convert_cytological(
        &self,
        loci: &[Locus],
        anchors: &CalibrationAnchors,
    ) -> Vec<ConversionResult> {
        let lookup = ArmAwareLookup::new(self.table);

        // The first centromere flips every later locus onto the long arm
        let (_, results) = loci.iter().fold(
            (ArmMode::Short, Vec::with_capacity(loci.len())),
            |(mode, mut results), locus| {
                let mode = if locus.is_centromere() {
                    ArmMode::Long
                } else {
                    mode
                };

                let (arm, genetic, physical_position, cytological_fraction) =
                    if locus.is_centromere() {
                        (
                            Arm::Centromere,
                            anchors.centromere_genetic,
                            anchors.centromere_physical,
                            anchors.centromere_cytological,
                        )
                    } else {
                        (
                            mode.arm(),
                            lookup.cytological_to_genetic(locus.position, mode),
                            lookup.cytological_to_physical(locus.position, mode),
                            locus.position,
                        )
                    };

                results.push(ConversionResult {
                    name: locus.name.clone(),
                    source_position: locus.position,
                    rn_position: genetic,
                    physical_position,
                    cytological_fraction,
                    arm,
                    arm_fraction: None,
                    scaled_genetic: Some(genetic * self.factor),
                });
                (mode, results)
            },
        );
        results
    }
}

/// Where the loci of a request come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LocusSource {
    /// A submitted list
    Submitted(Vec<Locus>),
    /// A built-in reference map
    ReferenceMap(ReferenceMap),
}

/// One conversion request against a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub chromosome: Chromosome,
    pub direction: Direction,
    pub source: LocusSource,
    pub factor: f64,
}

impl ConversionRequest {
    pub fn new(chromosome: Chromosome, direction: Direction, source: LocusSource) -> Self {
        Self {
            chromosome,
            direction,
            source,
            factor: 1.0,
        }
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }
}

/// Load data for a request, prepare its loci, and convert them.
pub fn convert_request<P: CalibrationProvider + ?Sized>(
    provider: &P,
    request: &ConversionRequest,
) -> Result<ConversionReport, M2mcError> {
    let table = provider.load_table(request.chromosome)?;

    let (loci, origin) = match &request.source {
        LocusSource::Submitted(loci) => (loci.clone(), LocusOrigin::Submitted),
        LocusSource::ReferenceMap(map) => (
            provider.load_reference_map(*map, request.chromosome)?,
            LocusOrigin::ReferenceMap,
        ),
    };
    let loci = prepare_loci(loci, request.direction, origin);

    LocusBatchConverter::new(&table)
        .with_factor(request.factor)
        .convert(&loci, request.direction)
}
