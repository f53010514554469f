//! Ingestion orchestration
//!
//! The coordinator drives the per-entity stages, the stage module tracks
//! their state machines, and the summary module reports the outcome.

pub mod coordinator;
pub mod stage;
pub mod summary;

pub use coordinator::IngestCoordinator;
pub use stage::{StageProgress, StageState};
pub use summary::{IngestError, IngestSummary, StageResult};
