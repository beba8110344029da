//! Maintenance request lifecycle and realtime notification fan-out.
//!
//! A [`MaintenanceSubject`] owns one request plus the observers registered
//! for a single status-change operation. `set_status` validates the candidate
//! against the closed status set, persists through the repository seam, then
//! notifies observers in registration order; the [`RealtimeDispatcher`]
//! observer republishes each change onto the requester's private channel, the
//! property owner's private channel, and the public updates feed via the
//! [`Broadcaster`] seam.

pub mod broadcast;
pub mod dispatcher;
pub mod domain;
pub mod registry;
pub mod repository;
pub mod router;
pub mod service;
pub mod subject;

#[cfg(test)]
mod tests;

pub use broadcast::{
    BroadcastError, Broadcaster, MaintenanceChannel, NotificationMessage, RealtimeHub,
    StatusUpdatePayload, STATUS_UPDATED_EVENT,
};
pub use dispatcher::{AuditTrailObserver, RealtimeDispatcher};
pub use domain::{
    DraftViolation, InvalidStatus, MaintenanceDraft, MaintenanceRequest, MaintenanceRequestView,
    MaintenanceSnapshot, MaintenanceStatus, RequestId, DEFAULT_PRIORITY,
};
pub use registry::{MaintenanceObserver, ObserverError, ObserverKind, ObserverRegistry};
pub use repository::{MaintenanceRepository, RepositoryError};
pub use router::maintenance_router;
pub use service::{MaintenanceService, MaintenanceServiceError};
pub use subject::{MaintenanceSubject, StatusChangeError};
