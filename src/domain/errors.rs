//! Domain error types
//!
//! This module defines the error hierarchy for Compass. All errors are
//! domain-specific and don't expose third-party types: HTTP client and
//! database driver errors are converted at the adapter boundary.
//!
//! The pipeline error taxonomy is deliberate:
//!
//! - Any [`FetchError`] aborts the current run without retry; the fetcher
//!   surfaces the page index reached so the operator knows how far it got.
//! - [`MappingError::UnknownRegionCode`] is fatal for the run. The source
//!   documents region codes as an exhaustive enumeration, so an unknown code
//!   means the data no longer matches the mapping tables (fail-closed).
//!   Unknown locale codes are NOT errors; they degrade to the `"None"`
//!   sentinel (fail-open), because unclassified institutions are legitimate.
//! - A [`LoadError`] rolls back only the current batch's transaction.
//!   Previously committed stages remain committed.

use thiserror::Error;

/// Main Compass error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CompassError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors while fetching from the Scorecard API
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Errors while mapping source codes to labels
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Errors while loading batches into PostgreSQL
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Database errors outside of batch loads (pool setup, schema, queries)
    #[error("Database error: {0}")]
    Database(String),

    /// Errors while assembling entity records from raw data
    #[error("Transform error: {0}")]
    Transform(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Ingestion state machine errors
    #[error("State error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while paging through the Scorecard API
///
/// Any of these halts fetching for the run. There is no automatic retry:
/// retrying is the caller's responsibility.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or timeout failure before a response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the API
    #[error("Protocol error: status {status} - {message}")]
    Protocol { status: u16, message: String },

    /// Response body could not be decoded as the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Errors raised by the code-to-label mapping tables
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// A region code outside the documented 0-9 enumeration
    ///
    /// `code` is `None` when the source record carried no region code at
    /// all, which is equally fatal: region is a required, exhaustively
    /// enumerated field.
    #[error("Unknown region code: {code:?}")]
    UnknownRegionCode { code: Option<i64> },
}

/// Errors raised while persisting a batch
#[derive(Debug, Error)]
pub enum LoadError {
    /// A constraint violation (foreign key, primary key, not-null)
    ///
    /// The whole batch has been rolled back; `unitid` identifies the record
    /// that triggered the violation.
    #[error("Integrity violation in {table} for unitid {unitid}: {detail}")]
    IntegrityViolation {
        table: &'static str,
        unitid: i32,
        detail: String,
    },

    /// The database could not be reached or the transaction failed to
    /// open or commit
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),
}

impl LoadError {
    /// The unitid of the record that caused the failure, if known
    pub fn unitid(&self) -> Option<i32> {
        match self {
            LoadError::IntegrityViolation { unitid, .. } => Some(*unitid),
            LoadError::ConnectionFailure(_) => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CompassError {
    fn from(err: std::io::Error) -> Self {
        CompassError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CompassError {
    fn from(err: serde_json::Error) -> Self {
        CompassError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CompassError {
    fn from(err: toml::de::Error) -> Self {
        CompassError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_error_display() {
        let err = CompassError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let fetch_err = FetchError::Transport("connection refused".to_string());
        let err: CompassError = fetch_err.into();
        assert!(matches!(err, CompassError::Fetch(_)));
    }

    #[test]
    fn test_fetch_protocol_error_display() {
        let err = FetchError::Protocol {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Protocol error: status 503 - service unavailable"
        );
    }

    #[test]
    fn test_mapping_error_conversion() {
        let mapping_err = MappingError::UnknownRegionCode { code: Some(12) };
        let err: CompassError = mapping_err.into();
        assert!(matches!(err, CompassError::Mapping(_)));
    }

    #[test]
    fn test_mapping_error_missing_code() {
        let err = MappingError::UnknownRegionCode { code: None };
        assert_eq!(err.to_string(), "Unknown region code: None");
    }

    #[test]
    fn test_load_error_unitid() {
        let err = LoadError::IntegrityViolation {
            table: "locations",
            unitid: 100654,
            detail: "foreign key violation".to_string(),
        };
        assert_eq!(err.unitid(), Some(100654));

        let err = LoadError::ConnectionFailure("pool timeout".to_string());
        assert_eq!(err.unitid(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CompassError = io_err.into();
        assert!(matches!(err, CompassError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CompassError = json_err.into();
        assert!(matches!(err, CompassError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CompassError = toml_err.into();
        assert!(matches!(err, CompassError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_compass_error_implements_std_error() {
        let err = CompassError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
