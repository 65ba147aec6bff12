//! Goal and alert repositories.
//!
//! Both collections are owned by other surfaces; the analytics service
//! reads them only to enrich the assistant data snapshot.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{AlertRecord, GoalRecord};

/// Repository for goal lookups.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all goals, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<GoalRecord>> {
        let records = sqlx::query_as::<_, GoalRecord>(
            r"
            SELECT id, agent_id, name, target_metric, target_value,
                   status, data_source, created_at
            FROM goals
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

/// Repository for alert lookups.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all alerts, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<AlertRecord>> {
        let records = sqlx::query_as::<_, AlertRecord>(
            r"
            SELECT id, agent_id, severity, message, created_at
            FROM alerts
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
