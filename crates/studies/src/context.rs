//! Assistant data snapshot.
//!
//! Assembles the JSON contract the chat relay forwards alongside the
//! conversation: every study with its derived fields, the study totals,
//! the agent catalog with per-agent projections, and the goal/alert
//! reference data. The relay itself lives elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agent_roi_data::{AgentRecord, AlertRecord, GoalRecord, StudyTotals, StudyWithAgent};

use crate::error::ServiceError;
use crate::projection::{project_active, summarize, AgentProjection, ProjectionSummary};
use crate::service::StudyService;
use crate::store::{AgentStore, ReferenceStore};

/// The full data context handed to the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSnapshot {
    pub studies: Vec<StudyWithAgent>,
    pub totals: StudyTotals,
    pub agents: Vec<AgentRecord>,
    pub projections: Vec<AgentProjection>,
    pub projection_summary: ProjectionSummary,
    pub goals: Vec<GoalRecord>,
    pub alerts: Vec<AlertRecord>,
    pub generated_at: DateTime<Utc>,
}

/// Builds the snapshot from the service and reference stores.
///
/// # Errors
/// Propagates storage errors from any collaborator.
pub async fn build_snapshot(
    service: &StudyService,
    agents: &dyn AgentStore,
    reference: &dyn ReferenceStore,
) -> Result<DataSnapshot, ServiceError> {
    let studies = service.list(None).await?;
    let totals = service.aggregate_totals().await?;
    let agent_records = agents.list().await?;
    let projections = project_active(&agent_records);
    let projection_summary = summarize(&projections);
    let goals = reference.list_goals().await?;
    let alerts = reference.list_alerts().await?;

    Ok(DataSnapshot {
        studies,
        totals,
        agents: agent_records,
        projections,
        projection_summary,
        goals,
        alerts,
        generated_at: Utc::now(),
    })
}
