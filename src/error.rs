//! Error types for ferro-m2mc
//!
//! Every failure aborts the whole conversion request. This module provides:
//! - Error codes for categorization
//! - Source span tracking for malformed locus lines
//! - Hints that name the precondition that failed

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes are printed by the CLI and can be used for programmatic
/// error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// A locus line could not be split into name and position
    MalformedLocus = 1001,
    /// The locus list was empty
    EmptyLocusList = 1002,
    /// Chromosome identifier outside the supported range
    InvalidChromosome = 1003,

    // Data errors (E2xxx)
    /// No calibration table for the chromosome
    DataUnavailable = 2001,
    /// A calibration row could not be parsed
    MalformedTable = 2002,

    // Validation errors (E3xxx)
    /// No centromere in the table or the locus list
    MissingCentromere = 3001,
    /// More than one centromere row in the table
    DuplicateCentromere = 3002,
    /// Min, centromere and max anchors coincide
    DegenerateAnchors = 3003,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MalformedLocus => "malformed locus line",
            ErrorCode::EmptyLocusList => "empty locus list",
            ErrorCode::InvalidChromosome => "invalid chromosome identifier",
            ErrorCode::DataUnavailable => "calibration data unavailable",
            ErrorCode::MalformedTable => "malformed calibration table",
            ErrorCode::MissingCentromere => "centromere not specified",
            ErrorCode::DuplicateCentromere => "more than one centromere row",
            ErrorCode::DegenerateAnchors => "degenerate map anchors",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting byte offset (0-indexed)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// bz1	far
    ///     ^~~
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let safe_start = self.start.min(source.len());
        let safe_end = self.end.min(source.len()).max(safe_start);

        // Tabs are echoed so the pointer lines up under the source
        let mut pointer: String = source[..safe_start]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        pointer.push('^');
        for _ in (safe_start + 1)..safe_end {
            pointer.push('~');
        }

        format!("{}\n{}", source, pointer)
    }
}

/// Diagnostic information for an error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostic {
    /// Error code
    pub code: Option<ErrorCode>,
    /// Source span for highlighting
    pub span: Option<SourceSpan>,
    /// The offending input line
    pub source: Option<String>,
    /// Helpful hint
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new empty diagnostic
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a source span
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach the offending input line
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the diagnostic as a detailed error message
    pub fn format(&self, primary_message: &str) -> String {
        let mut result = String::new();

        if let Some(code) = &self.code {
            result.push_str(&format!("[{}] ", code));
        }

        result.push_str(primary_message);

        if let (Some(span), Some(source)) = (&self.span, &self.source) {
            result.push_str("\n\n");
            result.push_str(&span.highlight(source));
        }

        if let Some(hint) = &self.hint {
            result.push_str("\n\nHint: ");
            result.push_str(hint);
        }

        result
    }
}

/// Where a centromere was expected but not found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CentromereSource {
    /// The calibration table has no row with cytological fraction 0
    Table,
    /// The submitted or reference locus list has no `cent`-prefixed locus
    LocusList,
}

impl fmt::Display for CentromereSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CentromereSource::Table => write!(f, "calibration table"),
            CentromereSource::LocusList => write!(f, "locus list"),
        }
    }
}

/// Main error type for ferro-m2mc operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum M2mcError {
    /// No calibration table exists for the chromosome
    #[error("No calibration data for chromosome {chromosome} ({path})")]
    DataUnavailable { chromosome: String, path: String },

    /// The table or locus list has no centromere
    #[error("No centromere found in {location}")]
    MissingCentromere { location: CentromereSource },

    /// The table has more than one row with cytological fraction 0
    #[error("Calibration table has more than one centromere row (rows {first_row} and {second_row})")]
    DuplicateCentromere { first_row: usize, second_row: usize },

    /// A locus line cannot be split into name and numeric position
    #[error("Malformed locus at line {line}: {msg}")]
    MalformedInput {
        line: usize,
        msg: String,
        /// Optional diagnostic with additional context
        diagnostic: Option<Box<Diagnostic>>,
    },

    /// A calibration row cannot be parsed
    #[error("Malformed calibration row at line {line}: {msg}")]
    MalformedTable { line: usize, msg: String },

    /// The min/centromere/max anchors coincide
    #[error("Degenerate map anchors: min={min}, centromere={centromere}, max={max}")]
    DegenerateAnchors { min: f64, centromere: f64, max: f64 },

    /// Chromosome identifier is not a maize chromosome
    #[error("Invalid chromosome: {id}")]
    InvalidChromosome { id: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl M2mcError {
    /// Create a malformed-input error with diagnostic information
    pub fn malformed_with_diagnostic(
        line: usize,
        msg: impl Into<String>,
        diagnostic: Diagnostic,
    ) -> Self {
        M2mcError::MalformedInput {
            line,
            msg: msg.into(),
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Create a simple malformed-input error without diagnostic
    pub fn malformed(line: usize, msg: impl Into<String>) -> Self {
        M2mcError::MalformedInput {
            line,
            msg: msg.into(),
            diagnostic: None,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            M2mcError::MalformedInput {
                diagnostic: Some(d),
                ..
            } => d.code.unwrap_or(ErrorCode::MalformedLocus),
            M2mcError::MalformedInput { .. } => ErrorCode::MalformedLocus,
            M2mcError::DataUnavailable { .. } => ErrorCode::DataUnavailable,
            M2mcError::MissingCentromere { .. } => ErrorCode::MissingCentromere,
            M2mcError::DuplicateCentromere { .. } => ErrorCode::DuplicateCentromere,
            M2mcError::MalformedTable { .. } => ErrorCode::MalformedTable,
            M2mcError::DegenerateAnchors { .. } => ErrorCode::DegenerateAnchors,
            M2mcError::InvalidChromosome { .. } => ErrorCode::InvalidChromosome,
            M2mcError::Io { .. } => ErrorCode::IoError,
            M2mcError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Get a formatted error with full diagnostic output
    pub fn detailed_message(&self) -> String {
        match self {
            M2mcError::MalformedInput {
                diagnostic: Some(d),
                ..
            } => d.format(&self.to_string()),
            M2mcError::MissingCentromere {
                location: CentromereSource::LocusList,
            } => Diagnostic::new()
                .with_code(self.code())
                .with_hint("add a locus whose name starts with \"cent\" at the centromere position")
                .format(&self.to_string()),
            M2mcError::DegenerateAnchors { .. } => Diagnostic::new()
                .with_code(self.code())
                .with_hint("the map needs loci on both sides of the centromere")
                .format(&self.to_string()),
            _ => format!("[{}] {}", self.code(), self),
        }
    }
}

impl From<std::io::Error> for M2mcError {
    fn from(err: std::io::Error) -> Self {
        M2mcError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for M2mcError {
    fn from(err: serde_json::Error) -> Self {
        M2mcError::Json {
            msg: err.to_string(),
        }
    }
}
