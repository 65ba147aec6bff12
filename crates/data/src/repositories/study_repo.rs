//! Study repository.
//!
//! Provides operations for storing and querying time-and-motion studies.
//! Reads join the owning agent's current name and category so callers
//! never duplicate agent fields into the study rows themselves.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{StudyRow, StudyWithAgent};

/// Repository for study operations.
#[derive(Debug, Clone)]
pub struct StudyRepository {
    pool: PgPool,
}

impl StudyRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new study and returns the generated ID.
    ///
    /// The row carries raw inputs and derived fields together; they are
    /// persisted in one statement so a failed write leaves no record.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, row: &StudyRow) -> Result<i32> {
        let inserted: (i32,) = sqlx::query_as(
            r"
            INSERT INTO studies
                (agent_id, task_description, study_date, time_without_ai_mins,
                 time_with_ai_mins, usage_count, usage_discount_pct, cost_per_hour,
                 notes, time_saved_mins, net_usage, net_time_saved_hours, potential_savings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            ",
        )
        .bind(row.agent_id)
        .bind(&row.task_description)
        .bind(row.study_date)
        .bind(row.time_without_ai_mins)
        .bind(row.time_with_ai_mins)
        .bind(row.usage_count)
        .bind(row.usage_discount_pct)
        .bind(row.cost_per_hour)
        .bind(&row.notes)
        .bind(row.time_saved_mins)
        .bind(row.net_usage)
        .bind(row.net_time_saved_hours)
        .bind(row.potential_savings)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted.0)
    }

    /// Gets a study by ID, joined with its agent's display fields.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: i32) -> Result<Option<StudyWithAgent>> {
        let record = sqlx::query_as::<_, StudyWithAgent>(
            r"
            SELECT s.id, s.agent_id, a.name AS agent_name, a.category AS agent_category,
                   s.task_description, s.study_date, s.time_without_ai_mins,
                   s.time_with_ai_mins, s.usage_count, s.usage_discount_pct,
                   s.cost_per_hour, s.notes, s.time_saved_mins, s.net_usage,
                   s.net_time_saved_hours, s.potential_savings, s.created_at
            FROM studies s
            JOIN agents a ON a.id = s.agent_id
            WHERE s.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists studies newest-created first, optionally filtered by agent.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn list(&self, agent_id: Option<i32>) -> Result<Vec<StudyWithAgent>> {
        let records = match agent_id {
            Some(agent_id) => {
                sqlx::query_as::<_, StudyWithAgent>(
                    r"
                    SELECT s.id, s.agent_id, a.name AS agent_name, a.category AS agent_category,
                           s.task_description, s.study_date, s.time_without_ai_mins,
                           s.time_with_ai_mins, s.usage_count, s.usage_discount_pct,
                           s.cost_per_hour, s.notes, s.time_saved_mins, s.net_usage,
                           s.net_time_saved_hours, s.potential_savings, s.created_at
                    FROM studies s
                    JOIN agents a ON a.id = s.agent_id
                    WHERE s.agent_id = $1
                    ORDER BY s.created_at DESC, s.id DESC
                    ",
                )
                .bind(agent_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StudyWithAgent>(
                    r"
                    SELECT s.id, s.agent_id, a.name AS agent_name, a.category AS agent_category,
                           s.task_description, s.study_date, s.time_without_ai_mins,
                           s.time_with_ai_mins, s.usage_count, s.usage_discount_pct,
                           s.cost_per_hour, s.notes, s.time_saved_mins, s.net_usage,
                           s.net_time_saved_hours, s.potential_savings, s.created_at
                    FROM studies s
                    JOIN agents a ON a.id = s.agent_id
                    ORDER BY s.created_at DESC, s.id DESC
                    ",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// Replaces a study's inputs and derived fields in one statement.
    ///
    /// Returns false if the study does not exist. The creation timestamp
    /// is preserved.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn update(&self, id: i32, row: &StudyRow) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE studies
            SET agent_id = $2, task_description = $3, study_date = $4,
                time_without_ai_mins = $5, time_with_ai_mins = $6, usage_count = $7,
                usage_discount_pct = $8, cost_per_hour = $9, notes = $10,
                time_saved_mins = $11, net_usage = $12, net_time_saved_hours = $13,
                potential_savings = $14
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(row.agent_id)
        .bind(&row.task_description)
        .bind(row.study_date)
        .bind(row.time_without_ai_mins)
        .bind(row.time_with_ai_mins)
        .bind(row.usage_count)
        .bind(row.usage_discount_pct)
        .bind(row.cost_per_hour)
        .bind(&row.notes)
        .bind(row.time_saved_mins)
        .bind(row.net_usage)
        .bind(row.net_time_saved_hours)
        .bind(row.potential_savings)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a study. Returns false if it did not exist.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM studies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sums the persisted derived columns across all studies.
    ///
    /// This reduces over stored values only (NULL counts as zero) and
    /// never recomputes from raw inputs, so rows written under an older
    /// formula version keep their recorded figures.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn totals(&self) -> Result<StudyTotals> {
        let result: (f64, f64, i64) = sqlx::query_as(
            r"
            SELECT COALESCE(SUM(net_time_saved_hours), 0)::DOUBLE PRECISION,
                   COALESCE(SUM(potential_savings), 0)::DOUBLE PRECISION,
                   COUNT(*)
            FROM studies
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StudyTotals {
            total_time_saved_hours: result.0,
            total_savings: result.1,
            total_studies: result.2,
        })
    }
}

/// Aggregate figures across all persisted studies.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StudyTotals {
    /// Sum of stored `net_time_saved_hours` values.
    pub total_time_saved_hours: f64,
    /// Sum of stored `potential_savings` values.
    pub total_savings: f64,
    /// Number of study records.
    pub total_studies: i64,
}

impl StudyTotals {
    /// Totals for an empty store.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_time_saved_hours: 0.0,
            total_savings: 0.0,
            total_studies: 0,
        }
    }
}
