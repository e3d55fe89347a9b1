//! CLI utilities for ferro-m2mc
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable comprehensive unit testing without requiring end-to-end CLI tests.

pub mod format;

// Re-export commonly used items
pub use format::{output_error, write_anchors, write_report, OutputFormat};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// This is common when files are exported from Windows applications or Excel.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}bz1\t12.5"), "bz1\t12.5");
/// assert_eq!(strip_bom("bz1\t12.5"), "bz1\t12.5");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from an input line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("bz1\t12.5  # from 1998 map"), "bz1\t12.5");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for first line), and strip inline comments.
///
/// Returns None if the line is empty or a comment-only line.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::cli::process_input_line;
///
/// assert_eq!(process_input_line("cent3\t55", false), Some("cent3\t55"));
/// assert_eq!(process_input_line("\u{feff}cent3\t55", true), Some("cent3\t55"));
/// assert_eq!(process_input_line("# comment", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
