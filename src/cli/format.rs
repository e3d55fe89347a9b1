//! Output formatting utilities for CLI operations

use crate::calibration::CalibrationAnchors;
use crate::convert::{ConversionReport, ConversionResult};
use crate::coords::{fraction_to_cmc, Direction};
use crate::error::M2mcError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain text table (default)
    #[default]
    #[serde(alias = "txt")]
    Text,
    /// JSON document
    Json,
    /// Tab-separated values with a header row
    #[serde(alias = "tab")]
    Tsv,
}

impl FromStr for OutputFormat {
    type Err = String;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_m2mc::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("TSV").unwrap(), OutputFormat::Tsv);
    /// assert!(OutputFormat::from_str("vcf").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "tsv" | "tab" => Ok(OutputFormat::Tsv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

fn headers(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::GeneticToPhysical => &[
            "locus",
            "cM",
            "arm_fraction",
            "RN-cM",
            "um_from_short_tip",
            "cyto_fraction",
            "cMC",
            "arm",
        ],
        Direction::CytologicalToGenetic => &[
            "locus",
            "cyto_fraction",
            "cMC",
            "um_from_short_tip",
            "cM",
            "cM_scaled",
            "arm",
        ],
    }
}

fn cells(result: &ConversionResult, direction: Direction, precision: usize) -> Vec<String> {
    let num = |v: f64| format!("{:.*}", precision, v);
    match direction {
        Direction::GeneticToPhysical => vec![
            result.name.clone(),
            num(result.source_position),
            result.arm_fraction.map(num).unwrap_or_default(),
            num(result.rn_position),
            num(result.physical_position),
            num(result.cytological_fraction),
            num(fraction_to_cmc(result.cytological_fraction)),
            result.arm.code().to_string(),
        ],
        Direction::CytologicalToGenetic => vec![
            result.name.clone(),
            num(result.cytological_fraction),
            num(fraction_to_cmc(result.cytological_fraction)),
            num(result.physical_position),
            num(result.rn_position),
            result.scaled_genetic.map(num).unwrap_or_default(),
            result.arm.code().to_string(),
        ],
    }
}

/// Write a conversion report
///
/// # Examples
///
/// ```
/// use ferro_m2mc::calibration::{CalibrationRow, CalibrationTable};
/// use ferro_m2mc::cli::{write_report, OutputFormat};
/// use ferro_m2mc::convert::LocusBatchConverter;
/// use ferro_m2mc::coords::Direction;
/// use ferro_m2mc::locus::Locus;
///
/// let table = CalibrationTable::new("1", vec![
///     CalibrationRow::new(0.0, -1.0, 0.0),
///     CalibrationRow::new(50.0, 0.0, 10.0),
///     CalibrationRow::new(100.0, 1.0, 20.0),
/// ]).unwrap();
/// let loci = vec![Locus::new("a", 25.0), Locus::new("cent", 50.0), Locus::new("b", 75.0)];
/// let report = LocusBatchConverter::new(&table)
///     .convert(&loci, Direction::GeneticToPhysical)
///     .unwrap();
///
/// let mut buffer = Vec::new();
/// write_report(&mut buffer, &report, OutputFormat::Tsv, 1).unwrap();
/// let text = String::from_utf8(buffer).unwrap();
/// assert!(text.contains("cent\t50.0\t0.0\t50.0\t10.0\t0.0\t0.0\tC"));
/// ```
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &ConversionReport,
    format: OutputFormat,
    precision: usize,
) -> io::Result<()> {
    let direction = report.direction;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)
        }
        OutputFormat::Tsv => {
            writeln!(writer, "{}", headers(direction).join("\t"))?;
            for result in &report.results {
                writeln!(writer, "{}", cells(result, direction, precision).join("\t"))?;
            }
            Ok(())
        }
        OutputFormat::Text => {
            writeln!(
                writer,
                "Chromosome {} ({} input, {} loci)",
                report.chromosome,
                direction,
                report.len()
            )?;
            if direction == Direction::CytologicalToGenetic {
                writeln!(writer, "Conversion factor: {}", report.factor)?;
            }
            writeln!(writer)?;

            let header: Vec<String> = headers(direction).iter().map(|h| h.to_string()).collect();
            let rows: Vec<Vec<String>> = report
                .results
                .iter()
                .map(|r| cells(r, direction, precision))
                .collect();

            let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
            for row in &rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.chars().count());
                }
            }

            for row in std::iter::once(&header).chain(rows.iter()) {
                let line: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                    .collect();
                writeln!(writer, "{}", line.join("  ").trim_end())?;
            }
            Ok(())
        }
    }
}

/// Write the anchors of a calibration table
pub fn write_anchors<W: Write>(
    writer: &mut W,
    chromosome: &str,
    rows: usize,
    anchors: &CalibrationAnchors,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "chromosome": chromosome,
                "rows": rows,
                "anchors": anchors,
            });
            serde_json::to_writer_pretty(&mut *writer, &value)?;
            writeln!(writer)
        }
        OutputFormat::Tsv => {
            writeln!(
                writer,
                "chromosome\trows\tmin_genetic\tcentromere_genetic\tmax_genetic\tcentromere_physical"
            )?;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                chromosome,
                rows,
                anchors.min_genetic,
                anchors.centromere_genetic,
                anchors.max_genetic,
                anchors.centromere_physical
            )
        }
        OutputFormat::Text => {
            writeln!(writer, "Chromosome {}: {} rows", chromosome, rows)?;
            writeln!(
                writer,
                "  genetic span:        {} .. {} RN-cM",
                anchors.min_genetic, anchors.max_genetic
            )?;
            writeln!(
                writer,
                "  centromere genetic:  {} RN-cM",
                anchors.centromere_genetic
            )?;
            writeln!(
                writer,
                "  centromere physical: {} um",
                anchors.centromere_physical
            )
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_m2mc::cli::{output_error, OutputFormat};
/// use ferro_m2mc::error::{CentromereSource, M2mcError};
///
/// let mut buffer = Vec::new();
/// let error = M2mcError::MissingCentromere { location: CentromereSource::LocusList };
/// output_error(&mut buffer, &error, OutputFormat::Text).unwrap();
/// let text = String::from_utf8(buffer).unwrap();
/// assert!(text.starts_with("Error: [E3001]"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    error: &M2mcError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "status": "error",
                "code": error.code().as_str(),
                "error": error.to_string(),
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            writeln!(writer, "Error: {}", error.detailed_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationRow, CalibrationTable};
    use crate::convert::LocusBatchConverter;
    use crate::locus::Locus;

    fn table() -> CalibrationTable {
        CalibrationTable::new(
            "1",
            vec![
                CalibrationRow::new(0.0, -1.0, 0.0),
                CalibrationRow::new(50.0, 0.0, 10.0),
                CalibrationRow::new(100.0, 1.0, 20.0),
            ],
        )
        .unwrap()
    }

    fn render(report: &ConversionReport, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, report, format, 2).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::Tsv.to_string(), "tsv");
    }

    #[test]
    fn test_cytological_tsv() {
        let t = table();
        let report = LocusBatchConverter::new(&t)
            .with_factor(0.5)
            .convert(
                &[Locus::new("cent", 0.0), Locus::new("tip", 1.0)],
                Direction::CytologicalToGenetic,
            )
            .unwrap();
        let text = render(&report, OutputFormat::Tsv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "locus\tcyto_fraction\tcMC\tum_from_short_tip\tcM\tcM_scaled\tarm");
        assert_eq!(lines[2], "tip\t1.00\t100.00\t20.00\t100.00\t50.00\tL");
    }

    #[test]
    fn test_genetic_tsv_reports_fraction_and_cmc() {
        let t = table();
        let report = LocusBatchConverter::new(&t)
            .convert(
                &[
                    Locus::new("a", 25.0),
                    Locus::new("cent", 50.0),
                    Locus::new("b", 100.0),
                ],
                Direction::GeneticToPhysical,
            )
            .unwrap();
        let text = render(&report, OutputFormat::Tsv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "locus\tcM\tarm_fraction\tRN-cM\tum_from_short_tip\tcyto_fraction\tcMC\tarm"
        );
        assert_eq!(lines[3], "b\t100.00\t1.00\t100.00\t20.00\t1.00\t100.00\tL");
    }

    #[test]
    fn test_text_table_is_aligned() {
        let t = table();
        let report = LocusBatchConverter::new(&t)
            .convert(
                &[
                    Locus::new("a", 25.0),
                    Locus::new("centromere", 50.0),
                    Locus::new("b", 75.0),
                ],
                Direction::GeneticToPhysical,
            )
            .unwrap();
        let text = render(&report, OutputFormat::Text);
        assert!(text.starts_with("Chromosome 1 (genetic input, 3 loci)"));
        let table_lines: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(table_lines.len(), 4);
        let col = table_lines[0].find("cM").unwrap();
        assert_eq!(&table_lines[2][col..col + 5], "50.00");
    }

    #[test]
    fn test_json_report() {
        let t = table();
        let report = LocusBatchConverter::new(&t)
            .convert(
                &[Locus::new("cent", 0.0)],
                Direction::CytologicalToGenetic,
            )
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json)).unwrap();
        assert_eq!(value["direction"], "cytological-to-genetic");
        assert_eq!(value["results"][0]["arm"], "centromere");
        assert_eq!(value["results"][0]["physical_position"], 10.0);
        assert!(value["results"][0].get("arm_fraction").is_none());
    }

    #[test]
    fn test_write_anchors() {
        let anchors = table().anchors().unwrap();
        let mut buffer = Vec::new();
        write_anchors(&mut buffer, "1", 3, &anchors, OutputFormat::Tsv).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("1\t3\t0\t50\t100\t10"));
    }

    #[test]
    fn test_output_error_json() {
        let mut buffer = Vec::new();
        let error = M2mcError::InvalidChromosome {
            id: "12".to_string(),
        };
        output_error(&mut buffer, &error, OutputFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["code"], "E1003");
        assert_eq!(value["status"], "error");
    }
}
