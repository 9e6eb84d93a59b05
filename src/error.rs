//! Error types for the stat sheet pipeline.
//!
//! Only structural failures are errors. Conditions the pipeline tolerates
//! (a row it could not read, a fused token with no valid split, an athlete
//! without stats) are reported as [`ParseWarning`] values or as `None`
//! fields instead, so one bad line never blanks a whole sheet.

use serde::Serialize;

/// Result type alias for statsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading sources and documents.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Invalid PDF header (expected '%PDF')
    #[error("Invalid PDF header: expected '%PDF', found '{0}'")]
    InvalidHeader(String),

    /// Parse error at specific byte offset
    #[error("Failed to parse object at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Invalid PDF structure
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Encrypted documents are not read
    #[error("Document is encrypted")]
    Encrypted,

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Recursion depth limit exceeded (nested page trees or form XObjects)
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// Every candidate source failed to fetch or validate
    #[error("No usable source among {tried} candidate(s); last failure: {last}")]
    SourceUnavailable {
        /// Number of candidates attempted
        tried: usize,
        /// Description of the last failure
        last: String,
    },

    /// A single fetch attempt failed
    #[error("Fetch failed for {location}: {reason}")]
    Fetch {
        /// Path or URL that was requested
        location: String,
        /// Reason reported by the fetcher
        reason: String,
    },

    /// Sport name not recognized
    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    /// Invalid calibration or profile settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal condition observed while parsing a document.
///
/// Warnings travel alongside the parsed records in a
/// [`ParseReport`](crate::parsers::ParseReport).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The document produced no rows or no recognizable section header.
    MalformedDocument {
        /// What was missing
        reason: String,
    },
    /// A fused token had no split satisfying the constraints; the affected
    /// fields were left unset.
    AmbiguousToken {
        /// Jersey of the row the token came from
        jersey: String,
        /// Name of the row the token came from
        name: String,
        /// Which fused group failed (e.g. "R-H-2B-3B-HR")
        field: String,
        /// The raw token text
        token: String,
    },
    /// A row inside a section could not be read and was skipped.
    SkippedRow {
        /// Section the row appeared in
        section: String,
        /// The row text
        text: String,
    },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::MalformedDocument { reason } => write!(f, "malformed document: {}", reason),
            ParseWarning::AmbiguousToken {
                jersey,
                name,
                field,
                token,
            } => write!(f, "#{} {}: no valid split of {} for '{}'", jersey, name, field, token),
            ParseWarning::SkippedRow { section, text } => {
                write!(f, "skipped {} row: {}", section, text)
            },
        }
    }
}
