use std::sync::Arc;

use super::broadcast::Broadcaster;
use super::dispatcher::{AuditTrailObserver, RealtimeDispatcher};
use super::domain::{
    DraftViolation, InvalidStatus, MaintenanceDraft, MaintenanceRequest, RequestId,
};
use super::registry::ObserverKind;
use super::repository::{MaintenanceRepository, RepositoryError};
use super::subject::{MaintenanceSubject, StatusChangeError};

/// Facade composing the repository and broadcaster behind the maintenance
/// lifecycle. Each status change runs on a fresh subject with the audit-trail
/// observer and the realtime dispatcher attached.
pub struct MaintenanceService<R, B> {
    repository: Arc<R>,
    broadcaster: Arc<B>,
}

impl<R, B> MaintenanceService<R, B>
where
    R: MaintenanceRepository + 'static,
    B: Broadcaster + 'static,
{
    pub fn new(repository: Arc<R>, broadcaster: Arc<B>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// Opens a new request at `REQUESTED`. Title and description must be
    /// non-empty; identity and timestamps come from the repository.
    pub fn open(
        &self,
        draft: MaintenanceDraft,
    ) -> Result<MaintenanceRequest, MaintenanceServiceError> {
        draft.check()?;
        let stored = self.repository.insert(draft)?;
        Ok(stored)
    }

    pub fn get(&self, id: RequestId) -> Result<MaintenanceRequest, MaintenanceServiceError> {
        let request = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(request)
    }

    /// Applies a status change and fans it out to the realtime channels.
    pub fn set_status(
        &self,
        id: RequestId,
        candidate: &str,
    ) -> Result<MaintenanceRequest, MaintenanceServiceError> {
        let request = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let mut subject = MaintenanceSubject::new(request, self.repository.clone());
        subject.attach(ObserverKind::AuditTrail, Box::new(AuditTrailObserver));
        subject.attach(
            ObserverKind::Realtime,
            Box::new(RealtimeDispatcher::new(self.broadcaster.clone())),
        );

        subject.set_status(candidate)?;
        Ok(subject.into_request())
    }
}

/// Error raised by the maintenance service.
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceServiceError {
    #[error(transparent)]
    Draft(#[from] DraftViolation),
    #[error(transparent)]
    Status(#[from] InvalidStatus),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<StatusChangeError> for MaintenanceServiceError {
    fn from(value: StatusChangeError) -> Self {
        match value {
            StatusChangeError::InvalidStatus(err) => Self::Status(err),
            StatusChangeError::Persistence(err) => Self::Repository(err),
        }
    }
}
