//! Batch loader
//!
//! Inserts normalized records into the destination tables. Loads are
//! append-only blind inserts: no upsert, no conflict handling. Each batch
//! runs in a single transaction; the first failing row rolls the whole
//! batch back and the error names the offending table and unitid.

use crate::adapters::postgres::client::PostgresClient;
use crate::domain::records::{
    AdmissionRecord, ControlRecord, FinanceRecord, LocationRecord, SchoolRecord,
};
use crate::domain::LoadError;
use std::sync::Arc;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;

/// A record type that can be bulk-inserted into its destination table
trait BatchRow {
    const TABLE: &'static str;
    const INSERT_SQL: &'static str;

    /// Institution identifier, for error reporting
    fn unitid(&self) -> i32;

    /// Parameters in `INSERT_SQL` placeholder order
    fn params(&self) -> Vec<&(dyn ToSql + Sync)>;
}

impl BatchRow for SchoolRecord {
    const TABLE: &'static str = "schools";
    const INSERT_SQL: &'static str =
        "INSERT INTO schools (unitid, name, url) VALUES ($1, $2, $3)";

    fn unitid(&self) -> i32 {
        self.unitid
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.unitid, &self.name, &self.url]
    }
}

impl BatchRow for LocationRecord {
    const TABLE: &'static str = "locations";
    const INSERT_SQL: &'static str = "INSERT INTO locations \
         (school_unitid, city, zipcode, state, region, locale) \
         VALUES ($1, $2, $3, $4, $5, $6)";

    fn unitid(&self) -> i32 {
        self.school_unitid
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.school_unitid,
            &self.city,
            &self.zipcode,
            &self.state,
            &self.region,
            &self.locale,
        ]
    }
}

impl BatchRow for FinanceRecord {
    const TABLE: &'static str = "finances";
    const INSERT_SQL: &'static str = "INSERT INTO finances \
         (school_unitid, year, cost_attendance, avg_net_price, \
          in_state_tuition, out_state_tuition, tuition_per_fte, \
          instructional_expenditure_per_fte, avg_faculty_salary) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";

    fn unitid(&self) -> i32 {
        self.school_unitid
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.school_unitid,
            &self.year,
            &self.cost_attendance,
            &self.avg_net_price,
            &self.in_state_tuition,
            &self.out_state_tuition,
            &self.tuition_per_fte,
            &self.instructional_expenditure_per_fte,
            &self.avg_faculty_salary,
        ]
    }
}

impl BatchRow for ControlRecord {
    const TABLE: &'static str = "controls";
    const INSERT_SQL: &'static str = "INSERT INTO controls \
         (school_unitid, under_investigation, predominant_deg, highest_deg, \
          control, hbcu, religious_affiliation, carnegie_undergrad, \
          carnegie_size) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";

    fn unitid(&self) -> i32 {
        self.school_unitid
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.school_unitid,
            &self.under_investigation,
            &self.predominant_deg,
            &self.highest_deg,
            &self.control,
            &self.hbcu,
            &self.religious_affiliation,
            &self.carnegie_undergrad,
            &self.carnegie_size,
        ]
    }
}

impl BatchRow for AdmissionRecord {
    const TABLE: &'static str = "admissions";
    const INSERT_SQL: &'static str = "INSERT INTO admissions \
         (school_unitid, year, admission_rate, number_of_students, \
          sat_math_median, sat_reading_median, sat_writing_median, \
          act_math_median, act_english_median, act_writing_median, \
          act_cumulative_median, avg_sat_score_admitted) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)";

    fn unitid(&self) -> i32 {
        self.school_unitid
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.school_unitid,
            &self.year,
            &self.admission_rate,
            &self.number_of_students,
            &self.sat_math_median,
            &self.sat_reading_median,
            &self.sat_writing_median,
            &self.act_math_median,
            &self.act_english_median,
            &self.act_writing_median,
            &self.act_cumulative_median,
            &self.avg_sat_score_admitted,
        ]
    }
}

/// Transactional batch loader for the destination store
pub struct Loader {
    client: Arc<PostgresClient>,
    dry_run: bool,
}

impl Loader {
    pub fn new(client: Arc<PostgresClient>, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Insert a batch of school rows
    ///
    /// Schools load first; their primary keys satisfy the foreign keys of
    /// every dependent table.
    pub async fn insert_schools(
        &self,
        records: &[SchoolRecord],
    ) -> std::result::Result<u64, LoadError> {
        self.insert_batch(records).await
    }

    pub async fn insert_locations(
        &self,
        records: &[LocationRecord],
    ) -> std::result::Result<u64, LoadError> {
        self.insert_batch(records).await
    }

    pub async fn insert_finances(
        &self,
        records: &[FinanceRecord],
    ) -> std::result::Result<u64, LoadError> {
        self.insert_batch(records).await
    }

    pub async fn insert_controls(
        &self,
        records: &[ControlRecord],
    ) -> std::result::Result<u64, LoadError> {
        self.insert_batch(records).await
    }

    pub async fn insert_admissions(
        &self,
        records: &[AdmissionRecord],
    ) -> std::result::Result<u64, LoadError> {
        self.insert_batch(records).await
    }

    /// Insert one batch inside a single transaction
    ///
    /// All-or-nothing per batch: the first row error rolls back every row
    /// already inserted in this batch. Batches committed earlier in the run
    /// stay committed.
    async fn insert_batch<T: BatchRow>(
        &self,
        records: &[T],
    ) -> std::result::Result<u64, LoadError> {
        if records.is_empty() {
            return Ok(0);
        }

        if self.dry_run {
            tracing::info!(
                table = T::TABLE,
                records = records.len(),
                "DRY RUN - would insert batch"
            );
            return Ok(records.len() as u64);
        }

        let mut conn = self
            .client
            .get_connection()
            .await
            .map_err(|e| LoadError::ConnectionFailure(e.to_string()))?;

        let timeout_ms = self.client.statement_timeout_seconds() * 1000;
        conn.execute(format!("SET statement_timeout = {timeout_ms}").as_str(), &[])
            .await
            .map_err(|e| LoadError::ConnectionFailure(e.to_string()))?;

        let tx = conn
            .transaction()
            .await
            .map_err(|e| LoadError::ConnectionFailure(e.to_string()))?;

        let statement = tx
            .prepare(T::INSERT_SQL)
            .await
            .map_err(|e| LoadError::ConnectionFailure(e.to_string()))?;

        for record in records {
            if let Err(error) = tx.execute(&statement, &record.params()).await {
                let load_error = classify(error, T::TABLE, record.unitid());
                tracing::error!(
                    table = T::TABLE,
                    unitid = record.unitid(),
                    error = %load_error,
                    "Batch insert failed - rolling back"
                );
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(error = %rollback_error, "Rollback failed");
                }
                return Err(load_error);
            }
        }

        tx.commit()
            .await
            .map_err(|e| LoadError::ConnectionFailure(e.to_string()))?;

        tracing::debug!(
            table = T::TABLE,
            records = records.len(),
            "Batch committed"
        );
        Ok(records.len() as u64)
    }
}

/// Map a postgres error onto the load error taxonomy
///
/// Constraint violations carry the table and unitid so an operator can find
/// the offending source record; everything else is a connection-level
/// failure.
fn classify(error: tokio_postgres::Error, table: &'static str, unitid: i32) -> LoadError {
    if let Some(db_error) = error.as_db_error() {
        let code = db_error.code();
        if code == &SqlState::FOREIGN_KEY_VIOLATION
            || code == &SqlState::UNIQUE_VIOLATION
            || code == &SqlState::NOT_NULL_VIOLATION
            || code == &SqlState::CHECK_VIOLATION
        {
            return LoadError::IntegrityViolation {
                table,
                unitid,
                detail: db_error.message().to_string(),
            };
        }
    }
    LoadError::ConnectionFailure(error.to_string())
}
