use super::domain::{MaintenanceDraft, MaintenanceRequest, RequestId};

/// Storage abstraction so the subject and service can be exercised in
/// isolation. The implementation owns id assignment and both timestamps.
pub trait MaintenanceRepository: Send + Sync {
    /// Stores a new request at its initial status, assigning its id and
    /// stamping `created_at`/`updated_at`.
    fn insert(&self, draft: MaintenanceDraft) -> Result<MaintenanceRequest, RepositoryError>;

    /// Durably saves the current state of an existing request, stamping
    /// `updated_at`. Returns the stored entity.
    fn save(&self, request: MaintenanceRequest) -> Result<MaintenanceRequest, RepositoryError>;

    fn fetch(&self, id: RequestId) -> Result<Option<MaintenanceRequest>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
