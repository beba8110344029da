use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority recorded on a request when the requester left it blank.
pub const DEFAULT_PRIORITY: &str = "MEDIUM";

/// Closed enumeration of maintenance request states.
///
/// Transitions are intentionally unordered: a reviewer may move a request
/// straight from `Requested` to `Completed`. Only membership in this set is
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Requested,
    Reviewed,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Requested,
            Self::Reviewed,
            Self::InProgress,
            Self::Completed,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Reviewed => "REVIEWED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Guard applied before any status is written: the candidate must match
    /// one of the four states exactly (case-sensitive).
    pub fn validate(candidate: &str) -> Result<Self, InvalidStatus> {
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == candidate)
            .ok_or_else(|| InvalidStatus {
                candidate: candidate.to_string(),
            })
    }
}

/// Rejected status value, surfaced before any mutation or notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{candidate}' is not a maintenance status (expected REQUESTED, REVIEWED, IN_PROGRESS, or COMPLETED)")]
pub struct InvalidStatus {
    pub candidate: String,
}

/// Identifier assigned by the persistence collaborator on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub i64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A tenant-submitted maintenance request. The id and both timestamps are
/// owned by persistence; everything else is mutated only through the subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: RequestId,
    pub user_id: i64,
    pub property_id: i64,
    pub title: String,
    pub description: String,
    pub status: MaintenanceStatus,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    /// Immutable state bundle handed to observers, decoupled from the live
    /// entity so observers never see a partially-applied mutation.
    pub fn snapshot(&self) -> MaintenanceSnapshot {
        MaintenanceSnapshot {
            request_id: self.id.0,
            user_id: self.user_id,
            property_id: self.property_id,
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self
                .priority
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            assigned_to: self.assigned_to.clone(),
            completed_at: self.completed_at,
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Sanitized representation for API responses.
    pub fn status_view(&self) -> MaintenanceRequestView {
        MaintenanceRequestView {
            request_id: self.id,
            status: self.status.as_str(),
            priority: self
                .priority
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            assigned_to: self.assigned_to.clone(),
            completed_at: self.completed_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields a requester supplies when opening a request. Identity and
/// timestamps are filled in by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDraft {
    pub user_id: i64,
    pub property_id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MaintenanceDraft {
    pub(crate) fn check(&self) -> Result<(), DraftViolation> {
        if self.title.trim().is_empty() {
            return Err(DraftViolation::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(DraftViolation::EmptyDescription);
        }
        Ok(())
    }
}

/// Draft rejected before it ever reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftViolation {
    #[error("a maintenance request needs a non-empty title")]
    EmptyTitle,
    #[error("a maintenance request needs a non-empty description")]
    EmptyDescription,
}

/// Point-in-time copy of a request as observers see it. `priority` is always
/// concrete here; the `MEDIUM` default has already been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceSnapshot {
    pub request_id: i64,
    pub user_id: i64,
    pub property_id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response body for the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceRequestView {
    pub request_id: RequestId,
    pub status: &'static str,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
