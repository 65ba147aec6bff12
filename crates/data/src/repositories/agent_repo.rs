//! Agent repository.
//!
//! Read-side access to the agent catalog. Agents are maintained by the
//! deployment-management surface; this service only resolves references
//! and feeds the projection path.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::AgentRecord;

/// Repository for agent lookups.
#[derive(Debug, Clone)]
pub struct AgentRepository {
    pool: PgPool,
}

impl AgentRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets an agent by ID.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get(&self, id: i32) -> Result<Option<AgentRecord>> {
        let record = sqlx::query_as::<_, AgentRecord>(
            r"
            SELECT id, name, category, status, avg_time_without_agent_mins,
                   avg_time_with_agent_mins, avg_usage_count, default_usage_discount_pct,
                   avg_hourly_wage, target_user_base, current_active_users,
                   methodology, adoption_updated_at, created_at
            FROM agents
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists all agents ordered by name.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<AgentRecord>> {
        let records = sqlx::query_as::<_, AgentRecord>(
            r"
            SELECT id, name, category, status, avg_time_without_agent_mins,
                   avg_time_with_agent_mins, avg_usage_count, default_usage_discount_pct,
                   avg_hourly_wage, target_user_base, current_active_users,
                   methodology, adoption_updated_at, created_at
            FROM agents
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
