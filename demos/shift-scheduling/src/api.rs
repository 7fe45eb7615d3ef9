//! REST API handlers.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use shiftforge::{
    generate_schedule_cancellable, ExternalTermination, ScheduleResponse, ShiftForgeError,
};
use shiftforge_config::{AppConfig, ScheduleConfig, SolverConfig};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub solver: SolverConfig,
    /// Parameters used when a request carries no body.
    pub schedule: ScheduleConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            solver: config.solver,
            schedule: config.schedule,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/schedule/generate", post(generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World from ShiftForge" }))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: &'static str,
    pub details: ScheduleResponse,
}

/// POST /schedule/generate
///
/// The body is an optional JSON [`ScheduleConfig`]; without one the
/// configured defaults are solved.
async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let schedule = if body.iter().all(u8::is_ascii_whitespace) {
        state.schedule.clone()
    } else {
        serde_json::from_slice::<ScheduleConfig>(&body)
            .map_err(|e| ApiError::Unprocessable(format!("invalid schedule parameters: {e}")))?
    };
    let solver_config = state.solver.clone();
    let cancel = ExternalTermination::new(Arc::new(AtomicBool::new(false)));
    // Axum drops this future when the client goes away.
    let _cancel_on_drop = CancelOnDrop(cancel.clone());

    // CPU-bound; keep it off the async workers.
    let details = tokio::task::spawn_blocking(move || {
        let params = schedule
            .to_parameters()
            .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
        generate_schedule_cancellable(&params, &solver_config, cancel).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("solver task failed: {e}")))??;

    let message = if details.success {
        "Schedule generation process completed."
    } else {
        "Schedule generation process resulted in issues."
    };
    Ok(Json(GenerateResponse {
        success: details.success,
        message,
        details,
    }))
}

/// Stops the solve behind a request once the request is dropped.
struct CancelOnDrop(ExternalTermination);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.terminate();
    }
}

/// Handler failures.
#[derive(Debug)]
pub enum ApiError {
    /// The request's parameters cannot be modeled.
    Unprocessable(String),
    /// Anything unexpected.
    Internal(String),
}

impl From<ShiftForgeError> for ApiError {
    fn from(err: ShiftForgeError) -> Self {
        if err.is_configuration() {
            ApiError::Unprocessable(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                warn!(event = "request_failed", error = %msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal server error occurred: {msg}"),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
