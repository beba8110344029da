use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use upkeep::workflows::maintenance::{
    MaintenanceDraft, MaintenanceRepository, MaintenanceRequest, MaintenanceStatus,
    RepositoryError, RequestId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store standing in for the platform database. Ids are
/// assigned sequentially and both timestamps are stamped here, matching the
/// persistence contract.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMaintenanceRepository {
    records: Arc<Mutex<HashMap<RequestId, MaintenanceRequest>>>,
    sequence: Arc<AtomicI64>,
}

impl MaintenanceRepository for InMemoryMaintenanceRepository {
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

        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, request.clone());
        Ok(request)
    }

    fn save(&self, mut request: MaintenanceRequest) -> Result<MaintenanceRequest, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&request.id) {
            return Err(RepositoryError::NotFound);
        }
        request.updated_at = Utc::now();
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    fn fetch(&self, id: RequestId) -> Result<Option<MaintenanceRequest>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}
