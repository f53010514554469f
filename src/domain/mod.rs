//! Domain models and types for Compass.
//!
//! The domain layer provides:
//! - **Entity types** ([`Entity`]) naming each destination table and the
//!   Scorecard API fields it is built from
//! - **Raw and normalized records** ([`RawRecord`], [`SchoolRecord`],
//!   [`LocationRecord`], [`FinanceRecord`], [`ControlRecord`],
//!   [`AdmissionRecord`])
//! - **Error types** ([`CompassError`], [`FetchError`], [`MappingError`],
//!   [`LoadError`])
//! - **Result type alias** ([`Result`])
//!
//! No type here performs I/O; adapters convert their third-party errors
//! into this module's error taxonomy at the boundary.

pub mod entity;
pub mod errors;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use entity::{Entity, FIELD_UNITID};
pub use errors::{CompassError, FetchError, LoadError, MappingError};
pub use records::{
    AdmissionRecord, ControlRecord, FinanceRecord, LocationRecord, RawBatch, RawRecord,
    SchoolRecord,
};
pub use result::Result;
