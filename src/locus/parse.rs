//! Locus list parser
//!
//! One locus per line: `name<TAB>position`. Extra tab-separated fields are
//! ignored. Blank lines and `#` comments are skipped, and a UTF-8 BOM on the
//! first line is removed.

use super::Locus;
use crate::cli::process_input_line;
use crate::error::{Diagnostic, ErrorCode, M2mcError, SourceSpan};
use std::io::BufRead;

/// Parse one locus line.
fn parse_locus_line(line: &str, line_num: usize) -> Result<Locus, M2mcError> {
    let mut fields = line.split('\t').filter(|f| !f.trim().is_empty());

    let name = fields.next().map(str::trim).unwrap_or_default();
    let Some(raw_position) = fields.next() else {
        return Err(M2mcError::malformed_with_diagnostic(
            line_num,
            format!("no position for locus '{}'", name),
            Diagnostic::new()
                .with_code(ErrorCode::MalformedLocus)
                .with_span(SourceSpan::new(0, line.len()))
                .with_source(line)
                .with_hint("separate the locus name from its position with a tab, not spaces"),
        ));
    };

    let position_text = raw_position.trim();
    // NaN and infinities parse as f64 but have no place on a map
    let position = position_text.parse::<f64>().ok().filter(|p| p.is_finite());
    position.map(|position| Locus::new(name, position)).ok_or_else(|| {
        let start = line.find(position_text).unwrap_or(0);
        M2mcError::malformed_with_diagnostic(
            line_num,
            format!("'{}' is not a finite number", position_text),
            Diagnostic::new()
                .with_code(ErrorCode::MalformedLocus)
                .with_span(SourceSpan::new(start, start + position_text.len()))
                .with_source(line),
        )
    })
}

/// Parse a locus list from a reader.
pub fn parse_locus_list<R: BufRead>(reader: R) -> Result<Vec<Locus>, M2mcError> {
    let mut loci = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|e| M2mcError::Io {
            msg: format!("Failed to read line {}: {}", line_num, e),
        })?;

        if let Some(content) = process_input_line(&line, idx == 0) {
            loci.push(parse_locus_line(content, line_num)?);
        }
    }

    log::debug!("Parsed {} loci", loci.len());
    Ok(loci)
}

/// Parse a locus list from a string.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::locus::parse_locus_str;
///
/// let loci = parse_locus_str("bz1\t12.5\ncent3\t55\n").unwrap();
/// assert_eq!(loci.len(), 2);
/// assert!(loci[1].is_centromere());
/// ```
pub fn parse_locus_str(text: &str) -> Result<Vec<Locus>, M2mcError> {
    parse_locus_list(text.as_bytes())
}
