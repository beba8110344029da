use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{InvalidStatus, MaintenanceRequest, MaintenanceStatus};
use super::registry::{MaintenanceObserver, ObserverKind, ObserverRegistry};
use super::repository::{MaintenanceRepository, RepositoryError};

/// A maintenance request plus the observers watching it for one status-change
/// operation.
///
/// Every subject owns a fresh, empty [`ObserverRegistry`]; registrations are
/// never shared across instances. Callers serialize status changes per
/// request: the registry and the persisted status are mutated as a unit with
/// no internal locking.
pub struct MaintenanceSubject<R> {
    request: MaintenanceRequest,
    registry: ObserverRegistry,
    repository: Arc<R>,
}

impl<R> MaintenanceSubject<R>
where
    R: MaintenanceRepository,
{
    pub fn new(request: MaintenanceRequest, repository: Arc<R>) -> Self {
        Self {
            request,
            registry: ObserverRegistry::new(),
            repository,
        }
    }

    pub fn attach(&mut self, kind: ObserverKind, observer: Box<dyn MaintenanceObserver>) -> bool {
        self.registry.attach(kind, observer)
    }

    pub fn detach(&mut self, kind: ObserverKind) -> bool {
        self.registry.detach(kind)
    }

    pub fn request(&self) -> &MaintenanceRequest {
        &self.request
    }

    pub fn into_request(self) -> MaintenanceRequest {
        self.request
    }

    /// Applies a status change as one logical operation:
    /// validate, assign, persist, then notify.
    ///
    /// Persistence must complete before notification is attempted; a change
    /// is never announced unless it was durably saved, and a saved change is
    /// always followed by a best-effort notification pass. Observer failures
    /// abort the remaining fan-out but are not surfaced here: the caller only
    /// ever sees [`StatusChangeError::InvalidStatus`] or
    /// [`StatusChangeError::Persistence`].
    pub fn set_status(
        &mut self,
        candidate: &str,
    ) -> Result<MaintenanceStatus, StatusChangeError> {
        let status = MaintenanceStatus::validate(candidate)?;

        let previous_status = self.request.status;
        let previous_completed_at = self.request.completed_at;

        self.request.status = status;
        if status == MaintenanceStatus::Completed && self.request.completed_at.is_none() {
            self.request.completed_at = Some(Utc::now());
        }

        match self.repository.save(self.request.clone()) {
            Ok(saved) => self.request = saved,
            Err(err) => {
                self.request.status = previous_status;
                self.request.completed_at = previous_completed_at;
                return Err(StatusChangeError::Persistence(err));
            }
        }

        let snapshot = self.request.snapshot();
        if let Err(err) = self.registry.notify_all(status, &snapshot) {
            warn!(
                request_id = snapshot.request_id,
                status = status.as_str(),
                error = %err,
                "observer fan-out aborted after the status change was persisted"
            );
        }

        Ok(status)
    }
}

/// Hard failures a `set_status` caller can observe. Anything purely in the
/// notification path never becomes one of these.
#[derive(Debug, thiserror::Error)]
pub enum StatusChangeError {
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}
