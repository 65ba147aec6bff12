use crate::handlers::{self, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    #[must_use]
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/studies", get(handlers::list_studies))
            .route("/api/studies", post(handlers::create_study))
            .route("/api/studies/totals", get(handlers::study_totals))
            .route("/api/studies/export", get(handlers::export_studies))
            .route("/api/studies/:id", get(handlers::get_study))
            .route("/api/studies/:id", put(handlers::update_study))
            .route("/api/studies/:id", delete(handlers::delete_study))
            .route("/api/agents", get(handlers::list_agents))
            .route("/api/projections", get(handlers::projections))
            .route("/api/assistant/context", get(handlers::assistant_context))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_roi_data::AgentRecord;
    use agent_roi_studies::{MemoryStore, StudyService};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn sample_agent(id: i32) -> AgentRecord {
        AgentRecord {
            id,
            name: "Ticket Triage".to_string(),
            category: "Customer Support".to_string(),
            status: "active".to_string(),
            avg_time_without_agent_mins: 20.0,
            avg_time_with_agent_mins: 10.0,
            avg_usage_count: 20000,
            default_usage_discount_pct: 50.0,
            avg_hourly_wage: 50.0,
            target_user_base: 100,
            current_active_users: 40,
            methodology: None,
            adoption_updated_at: None,
            created_at: Utc::now(),
        }
    }

    fn test_router() -> Router {
        let store = Arc::new(MemoryStore::new());
        store.add_agent(sample_agent(1));
        let state = Arc::new(AppState {
            service: StudyService::new(store.clone(), store.clone()),
            agents: store.clone(),
            reference: store,
        });
        ApiServer::new(state).router()
    }

    fn study_body() -> Value {
        json!({
            "agent_id": 1,
            "task_description": "Categorize inbound tickets",
            "study_date": "2025-03-15",
            "time_without_ai_mins": 15.0,
            "time_with_ai_mins": 5.0,
            "usage_count": 31500,
            "usage_discount_pct": 50.0,
            "cost_per_hour": 50.0
        })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_list_roundtrip() {
        let router = test_router();

        let (status, created) =
            send(router.clone(), post_json("/api/studies", &study_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["agent_name"], "Ticket Triage");
        assert_eq!(created["net_time_saved_hours"], 2625.0);

        let (status, listed) = send(
            router,
            Request::builder()
                .uri("/api/studies")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_discount_returns_bad_request_naming_the_field() {
        let router = test_router();
        let mut body = study_body();
        body["usage_discount_pct"] = json!(150.0);

        let (status, error) = send(router, post_json("/api/studies", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], "usage_discount_pct");
    }

    #[tokio::test]
    async fn unknown_agent_returns_not_found() {
        let router = test_router();
        let mut body = study_body();
        body["agent_id"] = json!(99);

        let (status, _) = send(router, post_json("/api/studies", &body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_on_missing_study_returns_not_found() {
        let router = test_router();
        let request = Request::builder()
            .method("PUT")
            .uri("/api/studies/42")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"time_with_ai_mins": 7.0}).to_string()))
            .unwrap();

        let (status, _) = send(router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_not_found() {
        let router = test_router();
        let (_, created) = send(router.clone(), post_json("/api/studies", &study_body())).await;
        let id = created["id"].as_i64().unwrap();

        let delete_request = |id: i64| {
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/studies/{id}"))
                .body(Body::empty())
                .unwrap()
        };

        let (status, _) = send(router.clone(), delete_request(id)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(router, delete_request(id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn totals_route_is_not_shadowed_by_id_capture() {
        let router = test_router();
        let (status, totals) = send(
            router,
            Request::builder()
                .uri("/api/studies/totals")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(totals["total_studies"], 0);
        assert_eq!(totals["total_savings"], 0.0);
    }

    #[tokio::test]
    async fn export_sends_csv_attachment() {
        let router = test_router();
        send(router.clone(), post_json("/api/studies", &study_body())).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/studies/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/csv"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Study Date,Agent Name,Task Description"));
        assert!(text.contains("Categorize inbound tickets"));
    }

    #[tokio::test]
    async fn assistant_context_exposes_the_data_contract() {
        let router = test_router();
        send(router.clone(), post_json("/api/studies", &study_body())).await;

        let (status, snapshot) = send(
            router,
            Request::builder()
                .uri("/api/assistant/context")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["totals"]["total_studies"], 1);
        assert_eq!(snapshot["projections"].as_array().unwrap().len(), 1);
        assert_eq!(
            snapshot["projections"][0]["metrics"]["net_usage"],
            10000.0
        );
    }

    #[tokio::test]
    async fn projections_use_the_same_formula_as_studies() {
        let router = test_router();

        // A study entered with the agent's own projection variables.
        let mut body = study_body();
        body["time_without_ai_mins"] = json!(20.0);
        body["time_with_ai_mins"] = json!(10.0);
        body["usage_count"] = json!(20000);
        let (_, created) = send(router.clone(), post_json("/api/studies", &body)).await;

        let (_, projected) = send(
            router,
            Request::builder()
                .uri("/api/projections")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let metrics = &projected["projections"][0]["metrics"];
        assert_eq!(created["time_saved_mins"], metrics["time_saved_mins"]);
        assert_eq!(created["net_usage"], metrics["net_usage"]);
        assert_eq!(
            created["net_time_saved_hours"],
            metrics["net_time_saved_hours"]
        );
        assert_eq!(created["potential_savings"], metrics["potential_savings"]);
    }
}
