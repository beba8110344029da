use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::broadcast::Broadcaster;
use super::domain::{MaintenanceDraft, RequestId};
use super::repository::{MaintenanceRepository, RepositoryError};
use super::service::{MaintenanceService, MaintenanceServiceError};

/// Router builder exposing HTTP endpoints for request intake and status
/// changes.
pub fn maintenance_router<R, B>(service: Arc<MaintenanceService<R, B>>) -> Router
where
    R: MaintenanceRepository + 'static,
    B: Broadcaster + 'static,
{
    Router::new()
        .route("/api/v1/maintenance/requests", post(open_handler::<R, B>))
        .route(
            "/api/v1/maintenance/requests/:request_id",
            get(show_handler::<R, B>),
        )
        .route(
            "/api/v1/maintenance/requests/:request_id/status",
            post(status_handler::<R, B>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

pub(crate) async fn open_handler<R, B>(
    State(service): State<Arc<MaintenanceService<R, B>>>,
    axum::Json(draft): axum::Json<MaintenanceDraft>,
) -> Response
where
    R: MaintenanceRepository + 'static,
    B: Broadcaster + 'static,
{
    match service.open(draft) {
        Ok(request) => (StatusCode::CREATED, axum::Json(request.status_view())).into_response(),
        Err(MaintenanceServiceError::Draft(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn show_handler<R, B>(
    State(service): State<Arc<MaintenanceService<R, B>>>,
    Path(request_id): Path<i64>,
) -> Response
where
    R: MaintenanceRepository + 'static,
    B: Broadcaster + 'static,
{
    match service.get(RequestId(request_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request.status_view())).into_response(),
        Err(MaintenanceServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "maintenance request not found",
                "request_id": request_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, B>(
    State(service): State<Arc<MaintenanceService<R, B>>>,
    Path(request_id): Path<i64>,
    axum::Json(body): axum::Json<StatusChangeRequest>,
) -> Response
where
    R: MaintenanceRepository + 'static,
    B: Broadcaster + 'static,
{
    match service.set_status(RequestId(request_id), &body.status) {
        Ok(request) => (StatusCode::OK, axum::Json(request.status_view())).into_response(),
        Err(MaintenanceServiceError::Status(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(MaintenanceServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "maintenance request not found",
                "request_id": request_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
