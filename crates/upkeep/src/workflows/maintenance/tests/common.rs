use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::maintenance::broadcast::{
    BroadcastError, Broadcaster, NotificationMessage,
};
use crate::workflows::maintenance::domain::{
    MaintenanceDraft, MaintenanceRequest, MaintenanceSnapshot, MaintenanceStatus, RequestId,
};
use crate::workflows::maintenance::registry::{
    MaintenanceObserver, ObserverError, ObserverKind,
};
use crate::workflows::maintenance::repository::{MaintenanceRepository, RepositoryError};
use crate::workflows::maintenance::router::maintenance_router;
use crate::workflows::maintenance::service::MaintenanceService;

pub(super) fn draft() -> MaintenanceDraft {
    MaintenanceDraft {
        user_id: 7,
        property_id: 3,
        title: "Leak".to_string(),
        description: "Water pooling under the kitchen sink".to_string(),
        priority: None,
        notes: None,
    }
}

pub(super) fn request(id: i64) -> MaintenanceRequest {
    let stamp = Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).single().expect("valid stamp");
    MaintenanceRequest {
        id: RequestId(id),
        user_id: 7,
        property_id: 3,
        title: "Leak".to_string(),
        description: "Water pooling under the kitchen sink".to_string(),
        status: MaintenanceStatus::Requested,
        priority: None,
        assigned_to: None,
        completed_at: None,
        notes: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

pub(super) fn build_service() -> (
    MaintenanceService<MemoryRepository, SpyBroadcaster>,
    Arc<MemoryRepository>,
    Arc<SpyBroadcaster>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let broadcaster = Arc::new(SpyBroadcaster::default());
    let service = MaintenanceService::new(repository.clone(), broadcaster.clone());
    (service, repository, broadcaster)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<RequestId, MaintenanceRequest>>,
    sequence: AtomicI64,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn seed(&self, request: MaintenanceRequest) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(request.id, request);
    }

    pub(super) fn stored_status(&self, id: RequestId) -> Option<MaintenanceStatus> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&id)
            .map(|request| request.status)
    }

    pub(super) fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl MaintenanceRepository for MemoryRepository {
    fn insert(&self, draft: MaintenanceDraft) -> Result<MaintenanceRequest, RepositoryError> {
        let id = RequestId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let now = Utc::now();
        let request = MaintenanceRequest {
            id,
            user_id: draft.user_id,
            property_id: draft.property_id,
            title: draft.title,
            description: draft.description,
            status: MaintenanceStatus::Requested,
            priority: draft.priority,
            assigned_to: None,
            completed_at: None,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(id, request.clone());
        Ok(request)
    }

    fn save(&self, mut request: MaintenanceRequest) -> Result<MaintenanceRequest, RepositoryError> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        request.updated_at = Utc::now();
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(request.id, request.clone());
        Ok(request)
    }

    fn fetch(&self, id: RequestId) -> Result<Option<MaintenanceRequest>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .get(&id)
            .cloned())
    }
}

/// Repository whose save path always fails, for persistence-error scenarios.
pub(super) struct UnavailableRepository {
    pub(super) seeded: MaintenanceRequest,
}

impl MaintenanceRepository for UnavailableRepository {
    fn insert(&self, _draft: MaintenanceDraft) -> Result<MaintenanceRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _request: MaintenanceRequest) -> Result<MaintenanceRequest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, id: RequestId) -> Result<Option<MaintenanceRequest>, RepositoryError> {
        if id == self.seeded.id {
            Ok(Some(self.seeded.clone()))
        } else {
            Ok(None)
        }
    }
}

#[derive(Default)]
pub(super) struct SpyBroadcaster {
    published: Mutex<Vec<(NotificationMessage, bool)>>,
}

impl SpyBroadcaster {
    pub(super) fn published(&self) -> Vec<(NotificationMessage, bool)> {
        self.published
            .lock()
            .expect("broadcast mutex poisoned")
            .clone()
    }

    pub(super) fn channels(&self) -> Vec<String> {
        self.published()
            .into_iter()
            .map(|(message, _)| message.channel)
            .collect()
    }
}

impl Broadcaster for SpyBroadcaster {
    fn publish(
        &self,
        message: NotificationMessage,
        exclude_origin: bool,
    ) -> Result<(), BroadcastError> {
        self.published
            .lock()
            .expect("broadcast mutex poisoned")
            .push((message, exclude_origin));
        Ok(())
    }
}

/// Broadcaster that refuses every publish, for transport-failure scenarios.
#[derive(Default)]
pub(super) struct FailingBroadcaster {
    attempts: AtomicUsize,
}

impl FailingBroadcaster {
    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl Broadcaster for FailingBroadcaster {
    fn publish(
        &self,
        _message: NotificationMessage,
        _exclude_origin: bool,
    ) -> Result<(), BroadcastError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(BroadcastError::Transport("socket closed".to_string()))
    }
}

/// Observer recording every update it receives.
pub(super) struct RecordingObserver {
    pub(super) label: &'static str,
    pub(super) seen: Arc<Mutex<Vec<(&'static str, MaintenanceStatus)>>>,
}

impl RecordingObserver {
    pub(super) fn new(
        label: &'static str,
        seen: Arc<Mutex<Vec<(&'static str, MaintenanceStatus)>>>,
    ) -> Self {
        Self { label, seen }
    }
}

impl MaintenanceObserver for RecordingObserver {
    fn update(
        &self,
        status: MaintenanceStatus,
        _snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError> {
        self.seen
            .lock()
            .expect("observer mutex poisoned")
            .push((self.label, status));
        Ok(())
    }
}

/// Observer that fails on every update.
pub(super) struct FaultyObserver;

impl MaintenanceObserver for FaultyObserver {
    fn update(
        &self,
        _status: MaintenanceStatus,
        _snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError> {
        Err(ObserverError::new(
            ObserverKind::AuditTrail,
            "audit sink rejected the entry",
        ))
    }
}

pub(super) fn maintenance_router_with_service(
    service: MaintenanceService<MemoryRepository, SpyBroadcaster>,
) -> axum::Router {
    maintenance_router(Arc::new(service))
}

pub(super) fn assert_not_found_response(response: &Response) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
