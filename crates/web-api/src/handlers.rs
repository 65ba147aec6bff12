use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agent_roi_data::{AgentRecord, CsvExport, StudyTotals, StudyWithAgent};
use agent_roi_studies::{
    build_snapshot, project_active, summarize, AgentProjection, AgentStore, DataSnapshot,
    NewStudy, ProjectionSummary, ReferenceStore, ServiceError, StudyService, UpdateStudy,
};

use crate::error::ApiError;

/// Shared handler state: the study service plus the read-side stores
/// the snapshot and projection endpoints draw from.
pub struct AppState {
    pub service: StudyService,
    pub agents: Arc<dyn AgentStore>,
    pub reference: Arc<dyn ReferenceStore>,
}

#[derive(Debug, Deserialize)]
pub struct ListStudiesParams {
    pub agent_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectionsResponse {
    pub projections: Vec<AgentProjection>,
    pub summary: ProjectionSummary,
}

/// Lists studies newest first, optionally filtered to one agent.
///
/// # Errors
/// Returns a 500 if the storage collaborator fails.
pub async fn list_studies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListStudiesParams>,
) -> Result<Json<Vec<StudyWithAgent>>, ApiError> {
    let studies = state.service.list(params.agent_id).await?;
    Ok(Json(studies))
}

/// Records a new study.
///
/// # Errors
/// 400 with the offending field for invalid input, 404 for an unknown
/// agent reference, 500 for storage failure.
pub async fn create_study(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewStudy>,
) -> Result<(StatusCode, Json<StudyWithAgent>), ApiError> {
    let study = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(study)))
}

/// Gets a single study.
///
/// # Errors
/// 404 if the study does not exist, 500 for storage failure.
pub async fn get_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StudyWithAgent>, ApiError> {
    let study = state
        .service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::study_not_found(id))?;
    Ok(Json(study))
}

/// Updates a study from a partial or full body.
///
/// # Errors
/// 404 for an unknown study or agent, 400 for invalid merged input,
/// 500 for storage failure.
pub async fn update_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<UpdateStudy>,
) -> Result<Json<StudyWithAgent>, ApiError> {
    let study = state.service.update(id, patch).await?;
    Ok(Json(study))
}

/// Deletes a study.
///
/// # Errors
/// 404 if the study does not exist, 500 for storage failure.
pub async fn delete_study(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::study_not_found(id))
    }
}

/// Returns the stored-derived-field totals across all studies.
///
/// # Errors
/// Returns a 500 if the storage collaborator fails.
pub async fn study_totals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StudyTotals>, ApiError> {
    let totals = state.service.aggregate_totals().await?;
    Ok(Json(totals))
}

/// Downloads all studies as CSV.
///
/// # Errors
/// Returns a 500 if the storage collaborator or serialization fails.
pub async fn export_studies(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let studies = state.service.list(None).await?;
    let csv = CsvExport::studies_to_string(&studies)
        .map_err(ServiceError::Storage)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"studies.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Lists the agent catalog.
///
/// # Errors
/// Returns a 500 if the storage collaborator fails.
pub async fn list_agents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AgentRecord>>, ApiError> {
    let agents = state
        .agents
        .list()
        .await
        .map_err(ServiceError::Storage)?;
    Ok(Json(agents))
}

/// Returns per-agent projections and the organization rollup.
///
/// # Errors
/// Returns a 500 if the storage collaborator fails.
pub async fn projections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectionsResponse>, ApiError> {
    let agents = state
        .agents
        .list()
        .await
        .map_err(ServiceError::Storage)?;
    let projections = project_active(&agents);
    let summary = summarize(&projections);
    Ok(Json(ProjectionsResponse {
        projections,
        summary,
    }))
}

/// Returns the full data snapshot forwarded to the assistant.
///
/// # Errors
/// Returns a 500 if any storage collaborator fails.
pub async fn assistant_context(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataSnapshot>, ApiError> {
    let snapshot = build_snapshot(
        &state.service,
        state.agents.as_ref(),
        state.reference.as_ref(),
    )
    .await?;
    Ok(Json(snapshot))
}
