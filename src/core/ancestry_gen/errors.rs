//! Ancestry Generation Error Types
//!
//! Defines the error taxonomy for weighted selection, catalog merging and
//! document loading. Uses thiserror for ergonomic error handling with rich
//! context fields.

use thiserror::Error;

// ============================================================================
// Source Errors
// ============================================================================

/// Errors raised while fetching or decoding a single JSON document.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document does not exist at the requested location.
    #[error("Document not found: {path}")]
    NotFound { path: String },

    /// The transport failed or answered with a non-success status.
    #[error("Transport error fetching {path}{}: {reason}", status_suffix(.status))]
    Transport {
        path: String,
        status: Option<u16>,
        reason: String,
    },

    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the expected shape.
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a Transport error.
    pub fn transport(path: impl Into<String>, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a ReadFailed error.
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseFailed error.
    pub fn parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ParseFailed {
            path: path.into(),
            source,
        }
    }

    /// The document path this error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::Transport { path, .. }
            | Self::ReadFailed { path, .. }
            | Self::ParseFailed { path, .. } => path,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Result type for document fetches.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

// ============================================================================
// Generation Errors
// ============================================================================

/// Errors that can occur while rolling ancestries or building the catalog.
#[derive(Error, Debug)]
pub enum AncestryGenError {
    /// Weighted pick requested over an empty list.
    #[error("Cannot pick from an empty weighted list")]
    EmptyInput,

    /// Generation requested for a location absent from the location table.
    #[error("Unknown location '{location}'")]
    UnknownLocation { location: String },

    /// A distinct pair was requested from a table without two distinct values.
    #[error("Table '{table}' needs at least two distinct values, found {distinct}")]
    InsufficientDistinctValues { table: String, distinct: usize },

    /// A required document could not be loaded.
    #[error("Failed to load {document}: {source}")]
    Source {
        document: String,
        #[source]
        source: SourceError,
    },
}

impl AncestryGenError {
    /// Create an UnknownLocation error.
    pub fn unknown_location(location: impl Into<String>) -> Self {
        Self::UnknownLocation {
            location: location.into(),
        }
    }

    /// Create an InsufficientDistinctValues error.
    pub fn insufficient_distinct(table: impl Into<String>, distinct: usize) -> Self {
        Self::InsufficientDistinctValues {
            table: table.into(),
            distinct,
        }
    }

    /// Wrap a source error for a named document.
    pub fn load_failed(document: impl Into<String>, source: SourceError) -> Self {
        Self::Source {
            document: document.into(),
            source,
        }
    }

    /// Check if this error is recoverable (caller can treat it as a no-op).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownLocation { .. })
    }
}

/// Result type for ancestry generation.
pub type Result<T> = std::result::Result<T, AncestryGenError>;
