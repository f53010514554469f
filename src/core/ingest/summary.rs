//! Run summary types
//!
//! The coordinator produces an [`IngestSummary`] for every run, successful
//! or not. It drives the process exit code and the end-of-run log lines.

use crate::core::ingest::stage::StageState;
use crate::domain::Entity;
use std::time::Duration;

/// Outcome of one entity stage
#[derive(Debug, Clone)]
pub struct StageResult {
    pub entity: Entity,
    /// Pages fetched from the API
    pub pages: usize,
    /// Rows committed to the destination (all batches)
    pub records_loaded: u64,
    /// Terminal state the stage reached
    pub state: StageState,
}

/// An error recorded against the run
#[derive(Debug, Clone)]
pub struct IngestError {
    /// The stage the error occurred in, if it was stage-scoped
    pub entity: Option<Entity>,
    /// Coarse classification, e.g. "fetch", "mapping", "load"
    pub error_type: String,
    pub message: String,
}

/// Summary of an ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub stages: Vec<StageResult>,
    pub errors: Vec<IngestError>,
    pub duration: Duration,
    pub dry_run: bool,
}

impl IngestSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_stage(&mut self, result: StageResult) {
        self.stages.push(result);
    }

    pub fn record_error(&mut self, entity: Option<Entity>, error_type: &str, message: String) {
        self.errors.push(IngestError {
            entity,
            error_type: error_type.to_string(),
            message,
        });
    }

    /// Every stage committed and no errors were recorded
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
            && self.stages.len() == Entity::ORDERED.len()
            && self
                .stages
                .iter()
                .all(|s| s.state == StageState::Committed)
    }

    /// At least one stage committed rows before the run failed
    pub fn is_partial(&self) -> bool {
        !self.is_successful()
            && self
                .stages
                .iter()
                .any(|s| s.state == StageState::Committed)
    }

    /// Total rows committed across all stages
    pub fn total_records(&self) -> u64 {
        self.stages.iter().map(|s| s.records_loaded).sum()
    }

    /// Emit the end-of-run summary to the log
    pub fn log_summary(&self) {
        for stage in &self.stages {
            tracing::info!(
                entity = %stage.entity,
                state = %stage.state,
                pages = stage.pages,
                records = stage.records_loaded,
                "Stage result"
            );
        }
        for error in &self.errors {
            let entity = error
                .entity
                .map(|e| e.to_string())
                .unwrap_or_else(|| "run".to_string());
            tracing::error!(
                entity = %entity,
                error_type = %error.error_type,
                message = %error.message,
                "Run error"
            );
        }
        tracing::info!(
            stages_committed = self
                .stages
                .iter()
                .filter(|s| s.state == StageState::Committed)
                .count(),
            total_records = self.total_records(),
            errors = self.errors.len(),
            duration_secs = self.duration.as_secs_f64(),
            dry_run = self.dry_run,
            "Ingestion run complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(entity: Entity, records: u64) -> StageResult {
        StageResult {
            entity,
            pages: 1,
            records_loaded: records,
            state: StageState::Committed,
        }
    }

    #[test]
    fn test_all_stages_committed_is_successful() {
        let mut summary = IngestSummary::new(false);
        for entity in Entity::ORDERED {
            summary.record_stage(committed(entity, 100));
        }
        assert!(summary.is_successful());
        assert!(!summary.is_partial());
        assert_eq!(summary.total_records(), 500);
    }

    #[test]
    fn test_empty_run_is_not_successful() {
        let summary = IngestSummary::new(false);
        assert!(!summary.is_successful());
        assert!(!summary.is_partial());
    }

    #[test]
    fn test_failure_after_commit_is_partial() {
        let mut summary = IngestSummary::new(false);
        summary.record_stage(committed(Entity::School, 100));
        summary.record_stage(StageResult {
            entity: Entity::Location,
            pages: 1,
            records_loaded: 0,
            state: StageState::Failed,
        });
        summary.record_error(
            Some(Entity::Location),
            "load",
            "integrity violation".to_string(),
        );
        assert!(!summary.is_successful());
        assert!(summary.is_partial());
        assert_eq!(summary.total_records(), 100);
    }

    #[test]
    fn test_error_without_commits_is_not_partial() {
        let mut summary = IngestSummary::new(false);
        summary.record_stage(StageResult {
            entity: Entity::School,
            pages: 0,
            records_loaded: 0,
            state: StageState::Failed,
        });
        summary.record_error(Some(Entity::School), "fetch", "status 503".to_string());
        assert!(!summary.is_successful());
        assert!(!summary.is_partial());
    }
}
