use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::maintenance::router::{status_handler, StatusChangeRequest};
use crate::workflows::maintenance::service::MaintenanceService;

use super::common::{
    assert_not_found_response, build_service, draft, maintenance_router_with_service,
    read_json_body, request, MemoryRepository, SpyBroadcaster, UnavailableRepository,
};

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_requests() {
    let (service, _, _) = build_service();

    let response = status_handler::<MemoryRepository, SpyBroadcaster>(
        State(Arc::new(service)),
        Path(99),
        axum::Json(StatusChangeRequest {
            status: "REVIEWED".to_string(),
        }),
    )
    .await;

    assert_not_found_response(&response);
}

#[tokio::test]
async fn status_handler_returns_unprocessable_for_invalid_status() {
    let (service, _, _) = build_service();
    let stored = service.open(draft()).expect("draft is valid");

    let response = status_handler::<MemoryRepository, SpyBroadcaster>(
        State(Arc::new(service)),
        Path(stored.id.0),
        axum::Json(StatusChangeRequest {
            status: "CANCELLED".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_handler_returns_internal_error_on_repository_failure() {
    let service = MaintenanceService::new(
        Arc::new(UnavailableRepository { seeded: request(5) }),
        Arc::new(SpyBroadcaster::default()),
    );

    let response = status_handler::<UnavailableRepository, SpyBroadcaster>(
        State(Arc::new(service)),
        Path(5),
        axum::Json(StatusChangeRequest {
            status: "COMPLETED".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn open_route_accepts_drafts() {
    let (service, _, _) = build_service();
    let router = maintenance_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/maintenance/requests")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&draft()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("router handles the request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "REQUESTED");
    assert_eq!(body["priority"], "MEDIUM");
}

#[tokio::test]
async fn open_route_rejects_blank_titles() {
    let (service, _, _) = build_service();
    let router = maintenance_router_with_service(service);

    let mut blank = draft();
    blank.title = String::new();
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/maintenance/requests")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&blank).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router handles the request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_route_applies_the_change_and_reports_the_new_view() {
    let (service, _, broadcaster) = build_service();
    let stored = service.open(draft()).expect("draft is valid");
    let router = maintenance_router_with_service(service);

    let uri = format!("/api/v1/maintenance/requests/{}/status", stored.id.0);
    let response = router
        .oneshot(
            axum::http::Request::post(uri)
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "status": "IN_PROGRESS" })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("router handles the request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "IN_PROGRESS");

    assert_eq!(broadcaster.published().len(), 3);
}

#[tokio::test]
async fn show_route_returns_not_found_for_unknown_requests() {
    let (service, _, _) = build_service();
    let router = maintenance_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/maintenance/requests/99")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router handles the request");

    assert_not_found_response(&response);
    let body = read_json_body(response).await;
    assert_eq!(body["request_id"], 99);
    assert_eq!(body["error"], "maintenance request not found");
}

#[tokio::test]
async fn show_route_returns_the_current_view() {
    let (service, _, _) = build_service();
    let stored = service.open(draft()).expect("draft is valid");
    let router = maintenance_router_with_service(service);

    let uri = format!("/api/v1/maintenance/requests/{}", stored.id.0);
    let response = router
        .oneshot(
            axum::http::Request::get(uri)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router handles the request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["request_id"], stored.id.0);
    assert_eq!(body["status"], "REQUESTED");
}
