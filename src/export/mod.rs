//! Feature records for chromosome diagram tools
//!
//! A converted report yields two feature sets: the submitted map and the
//! converted map. Each set holds one record per locus followed by a
//! synthetic whole-chromosome record spanning the observed positions.
//! The RN reference track adds a third set of interval measurements.
//! Records are written as nine tab-separated GFF columns.

use crate::calibration::RnMeasure;
use crate::convert::{ChromosomeSpan, ConversionReport};
use crate::coords::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Source column of converted-map records.
pub const CONVERTED_SOURCE: &str = "tMorgan2McClintock";

/// Source column of RN track records.
pub const RN_SOURCE: &str = "Anderson";

/// File name of the RN track.
pub const RN_FILE_NAME: &str = "rn_data.gff";

/// Record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureKind {
    Locus,
    Chromosome,
    Measure,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Locus => write!(f, "locus"),
            FeatureKind::Chromosome => write!(f, "chromosome"),
            FeatureKind::Measure => write!(f, "measure"),
        }
    }
}

/// One feature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub seqid: String,
    pub source: String,
    pub kind: FeatureKind,
    pub start: f64,
    pub end: f64,
    /// Ninth column, e.g. `ID=bz1` or `value=0.5`
    pub attributes: String,
}

impl Feature {
    /// Format as a tab-separated GFF line (without newline).
    pub fn to_gff_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t.\t.\t.\t{}",
            self.seqid, self.source, self.kind, self.start, self.end, self.attributes
        )
    }
}

/// Feature records of both maps of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Submitted map
    pub input: Vec<Feature>,
    /// Converted map
    pub output: Vec<Feature>,
}

fn seqid(chromosome: &str) -> String {
    format!("Chr{}", chromosome)
}

fn map_features<'a>(
    chromosome: &str,
    source: &str,
    positions: impl Iterator<Item = (&'a str, f64)>,
    span: Option<ChromosomeSpan>,
) -> Vec<Feature> {
    let seqid = seqid(chromosome);
    let mut features: Vec<Feature> = positions
        .map(|(name, pos)| Feature {
            seqid: seqid.clone(),
            source: source.to_string(),
            kind: FeatureKind::Locus,
            start: pos,
            end: pos,
            attributes: format!("ID={}", name),
        })
        .collect();

    if let Some(span) = span {
        features.push(Feature {
            seqid: seqid.clone(),
            source: source.to_string(),
            kind: FeatureKind::Chromosome,
            start: span.start,
            end: span.end,
            attributes: format!("ID={}", seqid),
        });
    }
    features
}

/// Build the feature records of a report.
///
/// In the genetic direction converted positions are arm fractions, negated
/// on the short arm. In the cytological direction they are RN-cM positions.
pub fn features(report: &ConversionReport) -> FeatureSet {
    let input_source = match report.direction {
        Direction::GeneticToPhysical => "genetic",
        Direction::CytologicalToGenetic => "cytological",
    };

    let input = map_features(
        &report.chromosome,
        input_source,
        report
            .results
            .iter()
            .map(|r| (r.name.as_str(), r.source_position)),
        report.input_span(),
    );
    let output = map_features(
        &report.chromosome,
        CONVERTED_SOURCE,
        report
            .results
            .iter()
            .map(|r| (r.name.as_str(), r.target_position(report.direction))),
        report.chromosome_span(),
    );

    FeatureSet { input, output }
}

/// Build the RN track records of a chromosome.
///
/// Each measurement covers the interval from the previous position (0 for
/// the first) to its own position, valued at twice its frequency. A final
/// record spans 0 to the largest position.
pub fn rn_features(chromosome: &str, measures: &[RnMeasure]) -> Vec<Feature> {
    let seqid = seqid(chromosome);
    let (mut features, _, largest) = measures.iter().fold(
        (Vec::with_capacity(measures.len() + 1), 0.0_f64, 0.0_f64),
        |(mut features, previous, largest), m| {
            features.push(Feature {
                seqid: seqid.clone(),
                source: RN_SOURCE.to_string(),
                kind: FeatureKind::Measure,
                start: previous,
                end: m.position,
                attributes: format!("value={}", 2.0 * m.frequency),
            });
            (features, m.position, largest.max(m.position))
        },
    );

    features.push(Feature {
        seqid: seqid.clone(),
        source: RN_SOURCE.to_string(),
        kind: FeatureKind::Chromosome,
        start: 0.0,
        end: largest,
        attributes: format!("ID={}", seqid),
    });
    features
}

/// Write features as GFF lines.
pub fn write_gff<W: Write>(writer: &mut W, features: &[Feature]) -> io::Result<()> {
    for feature in features {
        writeln!(writer, "{}", feature.to_gff_line())?;
    }
    Ok(())
}

/// Write both feature sets of a report into a directory.
///
/// Files are named `<direction>_input.gff` and `<direction>_output.gff`.
/// Returns the paths written.
pub fn write_feature_files(
    dir: &Path,
    report: &ConversionReport,
) -> io::Result<(PathBuf, PathBuf)> {
    let set = features(report);
    let stem = report.direction.to_string();
    let input_path = dir.join(format!("{}_input.gff", stem));
    let output_path = dir.join(format!("{}_output.gff", stem));

    for (path, records) in [(&input_path, &set.input), (&output_path, &set.output)] {
        let mut writer = BufWriter::new(File::create(path)?);
        write_gff(&mut writer, records)?;
        writer.flush()?;
        log::info!("Wrote {} features to {}", records.len(), path.display());
    }

    Ok((input_path, output_path))
}

/// Write the RN track of a chromosome into a directory as `rn_data.gff`.
pub fn write_rn_feature_file(
    dir: &Path,
    chromosome: &str,
    measures: &[RnMeasure],
) -> io::Result<PathBuf> {
    let path = dir.join(RN_FILE_NAME);
    let records = rn_features(chromosome, measures);
    let mut writer = BufWriter::new(File::create(&path)?);
    write_gff(&mut writer, &records)?;
    writer.flush()?;
    log::info!("Wrote {} features to {}", records.len(), path.display());
    Ok(path)
}
