//! Storage seams for the study record service.
//!
//! The service talks to storage through these traits so the same
//! recompute-on-write guarantees hold against Postgres, the in-memory
//! store used in tests, or any future backend. The sqlx repositories
//! implement them below.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use agent_roi_data::repositories::Repositories;
use agent_roi_data::{
    AgentRecord, AgentRepository, AlertRecord, GoalRecord, StudyRepository, StudyRow, StudyTotals,
    StudyWithAgent,
};

/// Study collection: insert-with-generated-id, joined reads, full-row
/// replace, delete, and the stored-derived-field reduction.
#[async_trait]
pub trait StudyStore: Send + Sync {
    async fn insert(&self, row: StudyRow) -> Result<StudyWithAgent>;
    async fn get(&self, id: i32) -> Result<Option<StudyWithAgent>>;
    async fn list(&self, agent_id: Option<i32>) -> Result<Vec<StudyWithAgent>>;
    async fn update(&self, id: i32, row: StudyRow) -> Result<Option<StudyWithAgent>>;
    async fn delete(&self, id: i32) -> Result<bool>;
    async fn totals(&self) -> Result<StudyTotals>;
}

/// Agent catalog reads.
#[async_trait]
pub trait AgentStore: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<AgentRecord>>;
    async fn list(&self) -> Result<Vec<AgentRecord>>;
}

/// Read-only reference data carried into the assistant snapshot.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn list_goals(&self) -> Result<Vec<GoalRecord>>;
    async fn list_alerts(&self) -> Result<Vec<AlertRecord>>;
}

#[async_trait]
impl StudyStore for StudyRepository {
    async fn insert(&self, row: StudyRow) -> Result<StudyWithAgent> {
        let id = StudyRepository::insert(self, &row).await?;
        StudyRepository::get(self, id)
            .await?
            .ok_or_else(|| anyhow!("study {id} missing immediately after insert"))
    }

    async fn get(&self, id: i32) -> Result<Option<StudyWithAgent>> {
        StudyRepository::get(self, id).await
    }

    async fn list(&self, agent_id: Option<i32>) -> Result<Vec<StudyWithAgent>> {
        StudyRepository::list(self, agent_id).await
    }

    async fn update(&self, id: i32, row: StudyRow) -> Result<Option<StudyWithAgent>> {
        if StudyRepository::update(self, id, &row).await? {
            StudyRepository::get(self, id).await
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        StudyRepository::delete(self, id).await
    }

    async fn totals(&self) -> Result<StudyTotals> {
        StudyRepository::totals(self).await
    }
}

#[async_trait]
impl AgentStore for AgentRepository {
    async fn get(&self, id: i32) -> Result<Option<AgentRecord>> {
        AgentRepository::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<AgentRecord>> {
        AgentRepository::list(self).await
    }
}

#[async_trait]
impl ReferenceStore for Repositories {
    async fn list_goals(&self) -> Result<Vec<GoalRecord>> {
        self.goals.list().await
    }

    async fn list_alerts(&self) -> Result<Vec<AlertRecord>> {
        self.alerts.list().await
    }
}
