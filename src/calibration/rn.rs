//! Recombination nodule (RN) reference tracks
//!
//! An RN file lists one measurement per line as tab-separated
//! `label \t position \t frequency`, with positions in micrometers from the
//! short-arm tip. Any line containing `#` is skipped.

use crate::error::M2mcError;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One RN measurement ending at `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RnMeasure {
    pub label: String,
    /// Micrometers from the short-arm tip
    pub position: f64,
    /// Nodule frequency over the interval that ends here
    pub frequency: f64,
}

fn parse_field(field: &str, line: usize) -> Result<f64, M2mcError> {
    let field = field.trim();
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| M2mcError::MalformedTable {
            line,
            msg: format!("'{}' is not a finite number", field),
        })
}

/// Parse an RN track.
pub fn parse_rn_map<R: BufRead>(reader: R) -> Result<Vec<RnMeasure>, M2mcError> {
    let mut measures = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|e| M2mcError::Io {
            msg: format!("Failed to read line {}: {}", line_num, e),
        })?;

        let line = line.trim_end();
        if line.trim().is_empty() || line.contains('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(M2mcError::MalformedTable {
                line: line_num,
                msg: format!("expected 3 tab-separated fields, got {}", fields.len()),
            });
        }

        measures.push(RnMeasure {
            label: fields[0].trim().to_string(),
            position: parse_field(fields[1], line_num)?,
            frequency: parse_field(fields[2], line_num)?,
        });
    }

    log::debug!("Parsed {} RN measurements", measures.len());
    Ok(measures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rn_map() {
        let text = "# bin\tum\tfreq\n1\t2.5\t0.1\n2\t5.0\t0.25\n\n";
        let measures = parse_rn_map(text.as_bytes()).unwrap();
        assert_eq!(measures.len(), 2);
        assert_eq!(measures[1].label, "2");
        assert_eq!(measures[1].position, 5.0);
        assert_eq!(measures[1].frequency, 0.25);
    }

    #[test]
    fn test_lines_with_hash_anywhere_skipped() {
        let measures = parse_rn_map("1\t2.5\t0.1 # checked\n2\t4\t1\n".as_bytes()).unwrap();
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].position, 4.0);
    }

    #[test]
    fn test_malformed_rows() {
        assert!(matches!(
            parse_rn_map("1\t2.5\n".as_bytes()),
            Err(M2mcError::MalformedTable { line: 1, .. })
        ));
        assert!(matches!(
            parse_rn_map("1\t2\t0.1\n2\tNaN\t0.1\n".as_bytes()),
            Err(M2mcError::MalformedTable { line: 2, .. })
        ));
    }
}
