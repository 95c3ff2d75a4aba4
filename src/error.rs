//! Error types for schedule generation.
//!
//! Shape problems are caught before resolution and reported as
//! [`ValidationError`]. Recoverable shape problems become
//! [`NormalizationWarning`]s and travel alongside the result instead.

use thiserror::Error;

use crate::schedule::Period;

/// Structural problems with the supplied period data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A period label outside 1-8 (or not a number at all)
    #[error("Invalid period key '{key}': periods must be numbered 1 to 8")]
    InvalidPeriodKey { key: String },

    /// A period value whose shape cannot be repaired by truncation
    #[error("Period '{key}' is malformed: {reason}")]
    MalformedPeriod { key: String, reason: String },

    /// More than two periods have no class name at all
    #[error("{count} periods have no classes (at most 2 may be empty): {}", format_periods(.periods))]
    TooManyEmptyPeriods { count: usize, periods: Vec<Period> },
}

impl ValidationError {
    /// Short machine-readable tag, used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidPeriodKey { .. } => "invalid_period_key",
            ValidationError::MalformedPeriod { .. } => "malformed_period",
            ValidationError::TooManyEmptyPeriods { .. } => "too_many_empty_periods",
        }
    }
}

fn format_periods(periods: &[Period]) -> String {
    periods
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn code_point(ch: &char) -> u32 {
    *ch as u32
}

/// Non-fatal problems that were repaired during normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationWarning {
    #[error(
        "Period {period} has {names} names, {rooms} rooms and {teachers} teachers; truncated to {kept} entries"
    )]
    MismatchedFieldLengths {
        period: Period,
        names: usize,
        rooms: usize,
        teachers: usize,
        kept: usize,
    },
}

/// Failures while producing the SVG document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot render {field} text {text:?}: character U+{:04X} is not allowed", code_point(.ch))]
    UnsupportedCharacter {
        field: &'static str,
        text: String,
        ch: char,
    },

    #[error("Embedded font '{family}' could not be read: {reason}")]
    Font { family: &'static str, reason: String },

    #[error("Failed to write SVG: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Failures while reading input files or payloads.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported input file '{0}': expected .json or .csv")]
    UnsupportedFormat(String),
}

/// Anything that stops a schedule from being generated.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
