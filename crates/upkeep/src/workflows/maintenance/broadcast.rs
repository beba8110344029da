//! Channel naming, outbound message shape, and the broadcaster seam.
//!
//! Delivery mechanics (connection handling, retry, subscriber auth) belong to
//! the realtime transport behind the [`Broadcaster`] trait; this module only
//! defines what gets published and where. The in-process [`RealtimeHub`]
//! adapter rides a tokio broadcast channel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use super::domain::{MaintenanceSnapshot, MaintenanceStatus};

/// Event name shared by every status-change message, on every channel.
pub const STATUS_UPDATED_EVENT: &str = "maintenance.status.updated";

/// A named realtime delivery scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceChannel {
    /// Private channel scoped to the requester.
    User(i64),
    /// Private channel scoped to the property owner.
    Property(i64),
    /// Public feed any subscriber may follow.
    Updates,
}

impl MaintenanceChannel {
    pub fn name(self) -> String {
        match self {
            Self::User(user_id) => format!("maintenance.user.{user_id}"),
            Self::Property(property_id) => format!("maintenance.property.{property_id}"),
            Self::Updates => "maintenance.updates".to_string(),
        }
    }

    pub const fn is_private(self) -> bool {
        !matches!(self, Self::Updates)
    }
}

/// Wire payload carried by every status-change message. Identical across all
/// three channels for one transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdatePayload {
    pub status: MaintenanceStatus,
    pub request_id: i64,
    pub user_id: i64,
    pub property_id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub updated_at: DateTime<Utc>,
}

impl StatusUpdatePayload {
    pub fn from_snapshot(status: MaintenanceStatus, snapshot: &MaintenanceSnapshot) -> Self {
        Self {
            status,
            request_id: snapshot.request_id,
            user_id: snapshot.user_id,
            property_id: snapshot.property_id,
            title: snapshot.title.clone(),
            description: snapshot.description.clone(),
            priority: snapshot.priority.clone(),
            updated_at: snapshot.updated_at,
        }
    }
}

/// Channel-scoped message handed to the broadcaster; immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationMessage {
    pub channel: String,
    pub event: &'static str,
    pub payload: StatusUpdatePayload,
}

impl NotificationMessage {
    pub fn status_updated(channel: MaintenanceChannel, payload: StatusUpdatePayload) -> Self {
        Self {
            channel: channel.name(),
            event: STATUS_UPDATED_EVENT,
            payload,
        }
    }
}

/// Realtime transport contract consumed by the dispatcher. Best-effort: no
/// delivery acknowledgement is surfaced, and publish failures never roll back
/// the persisted status that triggered them.
pub trait Broadcaster: Send + Sync {
    /// Delivers `message` to current subscribers of its channel.
    /// `exclude_origin` asks the transport to skip the connection that
    /// triggered the change (notify others, not self).
    fn publish(&self, message: NotificationMessage, exclude_origin: bool)
        -> Result<(), BroadcastError>;
}

/// Transport-side publish failure. Swallowed (and logged) at the dispatcher
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("realtime transport unavailable: {0}")]
    Transport(String),
}

/// In-process broadcaster backed by a tokio broadcast channel. Subscribers
/// receive messages for every channel and filter on `message.channel`;
/// lagging subscribers lose the oldest messages (at-most-once, best-effort).
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    sender: broadcast::Sender<NotificationMessage>,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Broadcaster for RealtimeHub {
    fn publish(
        &self,
        message: NotificationMessage,
        _exclude_origin: bool,
    ) -> Result<(), BroadcastError> {
        // An empty subscriber set is not a transport failure; the send result
        // only reports that nobody is currently listening.
        let _ = self.sender.send(message);
        Ok(())
    }
}
