//! Study record service.
//!
//! Owns the recompute-on-write contract: every create and update runs
//! the metrics engine over the full set of raw inputs and persists
//! inputs and derived fields as one row. Validation happens before the
//! engine is invoked and before any persistence attempt, so a rejected
//! request never leaves a partial or stale record.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agent_roi_core::compute_metrics;
use agent_roi_data::{StudyRow, StudyTotals, StudyWithAgent};

use crate::error::ServiceError;
use crate::store::{AgentStore, StudyStore};

/// Input for recording a new study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudy {
    pub agent_id: i32,
    pub task_description: String,
    pub study_date: NaiveDate,
    pub time_without_ai_mins: f64,
    pub time_with_ai_mins: f64,
    pub usage_count: i64,
    pub usage_discount_pct: f64,
    pub cost_per_hour: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial input for updating a study. Absent fields keep their stored
/// values; the merged result is re-validated as a whole before the
/// derived fields are recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudy {
    pub agent_id: Option<i32>,
    pub task_description: Option<String>,
    pub study_date: Option<NaiveDate>,
    pub time_without_ai_mins: Option<f64>,
    pub time_with_ai_mins: Option<f64>,
    pub usage_count: Option<i64>,
    pub usage_discount_pct: Option<f64>,
    pub cost_per_hour: Option<f64>,
    pub notes: Option<String>,
}

/// CRUD over study records with derived fields recomputed at every write.
#[derive(Clone)]
pub struct StudyService {
    studies: Arc<dyn StudyStore>,
    agents: Arc<dyn AgentStore>,
}

impl StudyService {
    /// Creates a service over the given storage collaborators.
    #[must_use]
    pub fn new(studies: Arc<dyn StudyStore>, agents: Arc<dyn AgentStore>) -> Self {
        Self { studies, agents }
    }

    /// Lists studies newest-created first, optionally for one agent.
    ///
    /// # Errors
    /// Returns a storage error if the collaborator fails.
    pub async fn list(&self, agent_id: Option<i32>) -> Result<Vec<StudyWithAgent>, ServiceError> {
        Ok(self.studies.list(agent_id).await?)
    }

    /// Gets a study by ID. Absence is not an error.
    ///
    /// # Errors
    /// Returns a storage error if the collaborator fails.
    pub async fn get(&self, id: i32) -> Result<Option<StudyWithAgent>, ServiceError> {
        Ok(self.studies.get(id).await?)
    }

    /// Records a new study.
    ///
    /// Validates the input, verifies the referenced agent exists, runs
    /// the metrics engine, and persists raw inputs plus derived fields
    /// atomically. Returns the stored record joined with the agent's
    /// display fields.
    ///
    /// # Errors
    /// Validation, reference, or storage errors per the taxonomy in
    /// [`ServiceError`].
    pub async fn create(&self, input: NewStudy) -> Result<StudyWithAgent, ServiceError> {
        validate(&input)?;

        if self.agents.get(input.agent_id).await?.is_none() {
            return Err(ServiceError::AgentNotFound { id: input.agent_id });
        }

        let row = derive_row(input);
        let study = self.studies.insert(row).await?;
        tracing::info!(
            study_id = study.id,
            agent_id = study.agent_id,
            "recorded study"
        );
        Ok(study)
    }

    /// Updates a study from a partial or full input.
    ///
    /// The patch is merged over the stored record, the merged input is
    /// re-validated, and the derived fields are recomputed before the
    /// row is replaced. There is no path that persists inputs without
    /// recomputation.
    ///
    /// # Errors
    /// `StudyNotFound` if the id does not exist (checked before any
    /// write); otherwise validation, reference, or storage errors.
    pub async fn update(
        &self,
        id: i32,
        patch: UpdateStudy,
    ) -> Result<StudyWithAgent, ServiceError> {
        let existing = self
            .studies
            .get(id)
            .await?
            .ok_or(ServiceError::StudyNotFound { id })?;

        let merged = NewStudy {
            agent_id: patch.agent_id.unwrap_or(existing.agent_id),
            task_description: patch
                .task_description
                .unwrap_or(existing.task_description),
            study_date: patch.study_date.unwrap_or(existing.study_date),
            time_without_ai_mins: patch
                .time_without_ai_mins
                .unwrap_or(existing.time_without_ai_mins),
            time_with_ai_mins: patch
                .time_with_ai_mins
                .unwrap_or(existing.time_with_ai_mins),
            usage_count: patch.usage_count.unwrap_or(existing.usage_count),
            usage_discount_pct: patch
                .usage_discount_pct
                .unwrap_or(existing.usage_discount_pct),
            cost_per_hour: patch.cost_per_hour.unwrap_or(existing.cost_per_hour),
            notes: patch.notes.or(existing.notes),
        };

        validate(&merged)?;

        if self.agents.get(merged.agent_id).await?.is_none() {
            return Err(ServiceError::AgentNotFound {
                id: merged.agent_id,
            });
        }

        let row = derive_row(merged);
        let study = self
            .studies
            .update(id, row)
            .await?
            .ok_or(ServiceError::StudyNotFound { id })?;
        tracing::info!(study_id = id, "updated study");
        Ok(study)
    }

    /// Deletes a study. Returns false if it did not exist.
    ///
    /// # Errors
    /// Returns a storage error if the collaborator fails.
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.studies.delete(id).await?;
        if deleted {
            tracing::info!(study_id = id, "deleted study");
        }
        Ok(deleted)
    }

    /// Sums persisted derived fields across all studies.
    ///
    /// A pure reduction over stored values; rows whose derived fields
    /// were computed under an older formula keep their recorded figures.
    ///
    /// # Errors
    /// Returns a storage error if the collaborator fails.
    pub async fn aggregate_totals(&self) -> Result<StudyTotals, ServiceError> {
        Ok(self.studies.totals().await?)
    }
}

/// Runs the engine over validated inputs and packs the write row.
fn derive_row(input: NewStudy) -> StudyRow {
    let metrics = compute_metrics(
        input.time_without_ai_mins,
        input.time_with_ai_mins,
        input.usage_count as f64,
        input.usage_discount_pct,
        input.cost_per_hour,
    );

    StudyRow {
        agent_id: input.agent_id,
        task_description: input.task_description,
        study_date: input.study_date,
        time_without_ai_mins: input.time_without_ai_mins,
        time_with_ai_mins: input.time_with_ai_mins,
        usage_count: input.usage_count,
        usage_discount_pct: input.usage_discount_pct,
        cost_per_hour: input.cost_per_hour,
        notes: input.notes,
        time_saved_mins: metrics.time_saved_mins,
        net_usage: metrics.net_usage,
        net_time_saved_hours: metrics.net_time_saved_hours,
        potential_savings: metrics.potential_savings,
    }
}

/// Rejects inputs outside the engine's documented domain, naming the
/// offending field. Runs before the engine and before any persistence.
fn validate(input: &NewStudy) -> Result<(), ServiceError> {
    if input.task_description.trim().is_empty() {
        return Err(ServiceError::invalid(
            "task_description",
            "must not be empty",
        ));
    }
    check_non_negative("time_without_ai_mins", input.time_without_ai_mins)?;
    check_non_negative("time_with_ai_mins", input.time_with_ai_mins)?;
    check_non_negative("cost_per_hour", input.cost_per_hour)?;
    if input.usage_count < 0 {
        return Err(ServiceError::invalid(
            "usage_count",
            format!("must be non-negative, got {}", input.usage_count),
        ));
    }
    if !input.usage_discount_pct.is_finite()
        || !(0.0..=100.0).contains(&input.usage_discount_pct)
    {
        return Err(ServiceError::invalid(
            "usage_discount_pct",
            format!("must be between 0 and 100, got {}", input.usage_discount_pct),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ServiceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServiceError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(())
}
