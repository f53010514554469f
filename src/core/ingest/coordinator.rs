//! Ingestion coordinator
//!
//! Drives the fetch, transform, load pipeline across all entity stages in
//! dependency order. School runs first; a failed stage aborts every stage
//! after it, so a dependent entity can never load against a schools table
//! its own run did not populate.
//!
//! Within a stage, each fetched page is one batch and one transaction:
//! a load failure rolls back only the current batch, and batches committed
//! earlier in the stage (or in earlier stages) stay committed. There is no
//! cross-stage compensation.

use crate::adapters::postgres::{Loader, PostgresClient};
use crate::adapters::scorecard::{Fields, ScorecardClient};
use crate::config::schema::CompassConfig;
use crate::core::ingest::stage::{StageProgress, StageState};
use crate::core::ingest::summary::{IngestSummary, StageResult};
use crate::core::transform;
use crate::domain::{CompassError, Entity, Result};
use std::sync::Arc;
use std::time::Instant;

/// Coordinates one ingestion run
pub struct IngestCoordinator {
    config: CompassConfig,
    scorecard: ScorecardClient,
    postgres: Arc<PostgresClient>,
    loader: Loader,
}

impl IngestCoordinator {
    /// Build a coordinator and its clients from configuration
    pub async fn new(config: CompassConfig) -> Result<Self> {
        let scorecard = ScorecardClient::new(&config.scorecard)?;
        let postgres = Arc::new(PostgresClient::new(config.postgres.clone()).await?);
        Ok(Self::with_clients(config, scorecard, postgres))
    }

    /// Build a coordinator from already-constructed clients
    ///
    /// Clients are always injected; there is no global client state to
    /// reach for, which keeps runs independent and testable.
    pub fn with_clients(
        config: CompassConfig,
        scorecard: ScorecardClient,
        postgres: Arc<PostgresClient>,
    ) -> Self {
        let loader = Loader::new(Arc::clone(&postgres), config.application.dry_run);
        Self {
            config,
            scorecard,
            postgres,
            loader,
        }
    }

    /// Execute a full ingestion run
    ///
    /// Always returns a summary; stage failures are recorded in it rather
    /// than raised. An `Err` here means the run could not start at all
    /// (unreachable database, failed schema setup).
    pub async fn execute_ingest(&self) -> Result<IngestSummary> {
        let start = Instant::now();
        let mut summary = IngestSummary::new(self.config.application.dry_run);

        tracing::info!(
            base_url = self.scorecard.base_url(),
            postgres = %self.postgres.connection_string_safe(),
            dry_run = summary.dry_run,
            "Starting ingestion run"
        );

        if summary.dry_run {
            tracing::info!("DRY RUN - destination schema checks skipped");
        } else {
            self.postgres.test_connection().await?;
            self.postgres.ensure_schema().await?;
        }

        for entity in Entity::ORDERED {
            if !self.run_stage(entity, &mut summary).await {
                tracing::error!(entity = %entity, "Stage failed - aborting remaining stages");
                break;
            }
        }

        summary.duration = start.elapsed();
        summary.log_summary();
        Ok(summary)
    }

    /// Run one entity stage, recording its outcome in the summary
    ///
    /// Returns whether the stage committed.
    async fn run_stage(&self, entity: Entity, summary: &mut IngestSummary) -> bool {
        tracing::info!(entity = %entity, "Stage starting");
        let mut progress = StageProgress::new(entity);
        let mut pages = 0usize;
        let mut records = 0u64;

        match self
            .stage_inner(entity, &mut progress, &mut pages, &mut records)
            .await
        {
            Ok(()) => {
                summary.record_stage(StageResult {
                    entity,
                    pages,
                    records_loaded: records,
                    state: progress.state(),
                });
                tracing::info!(entity = %entity, pages, records, "Stage committed");
                true
            }
            Err(error) => {
                if !progress.state().is_terminal() {
                    // Infallible: Failed is reachable from every active state.
                    let _ = progress.transition(StageState::Failed);
                }
                if let CompassError::Load(load_error) = &error {
                    if let Some(unitid) = load_error.unitid() {
                        tracing::error!(entity = %entity, unitid, "Load failed on record");
                    }
                }
                // Batches committed before the failure stay committed.
                summary.record_stage(StageResult {
                    entity,
                    pages,
                    records_loaded: records,
                    state: StageState::Failed,
                });
                summary.record_error(Some(entity), error_type(&error), error.to_string());
                false
            }
        }
    }

    async fn stage_inner(
        &self,
        entity: Entity,
        progress: &mut StageProgress,
        pages: &mut usize,
        records: &mut u64,
    ) -> Result<()> {
        let fields = Fields::new(entity.fields())?;

        progress.transition(StageState::Fetching)?;
        let batches = self
            .scorecard
            .fetch(&fields, self.config.scorecard.page_limit)
            .await
            .map_err(|failure| {
                tracing::warn!(
                    entity = %entity,
                    page = failure.page,
                    discarded_pages = failure.partial.len(),
                    "Fetch failed - discarding partial pages"
                );
                CompassError::Fetch(failure.error)
            })?;

        *pages = batches.len();
        if batches.is_empty() {
            progress.transition(StageState::Committed)?;
            return Ok(());
        }

        let data_year = self.config.scorecard.data_year;
        for batch in &batches {
            progress.transition(StageState::Transforming)?;
            let loaded = match entity {
                Entity::School => {
                    let rows = transform::schools(batch)?;
                    progress.transition(StageState::Loading)?;
                    self.loader.insert_schools(&rows).await?
                }
                Entity::Location => {
                    let rows = transform::locations(batch)?;
                    progress.transition(StageState::Loading)?;
                    self.loader.insert_locations(&rows).await?
                }
                Entity::Finance => {
                    let rows = transform::finances(batch, data_year)?;
                    progress.transition(StageState::Loading)?;
                    self.loader.insert_finances(&rows).await?
                }
                Entity::Control => {
                    let rows = transform::controls(batch)?;
                    progress.transition(StageState::Loading)?;
                    self.loader.insert_controls(&rows).await?
                }
                Entity::Admission => {
                    let rows = transform::admissions(batch, data_year)?;
                    progress.transition(StageState::Loading)?;
                    self.loader.insert_admissions(&rows).await?
                }
            };
            *records += loaded;
        }

        progress.transition(StageState::Committed)?;
        Ok(())
    }
}

/// Coarse classification of an error for the run summary
fn error_type(error: &CompassError) -> &'static str {
    match error {
        CompassError::Fetch(_) => "fetch",
        CompassError::Mapping(_) => "mapping",
        CompassError::Transform(_) => "transform",
        CompassError::Load(_) => "load",
        CompassError::Database(_) => "database",
        CompassError::State(_) => "state",
        CompassError::Validation(_) => "validation",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoadError;

    #[test]
    fn test_error_type_classification() {
        let err = CompassError::Load(LoadError::ConnectionFailure("pool timeout".to_string()));
        assert_eq!(error_type(&err), "load");

        let err = CompassError::Transform("missing unitid".to_string());
        assert_eq!(error_type(&err), "transform");

        let err = CompassError::Configuration("bad".to_string());
        assert_eq!(error_type(&err), "other");
    }
}
