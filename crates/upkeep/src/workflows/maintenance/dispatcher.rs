use std::sync::Arc;

use tracing::{info, warn};

use super::broadcast::{
    Broadcaster, MaintenanceChannel, NotificationMessage, StatusUpdatePayload,
};
use super::domain::{MaintenanceSnapshot, MaintenanceStatus};
use super::registry::{MaintenanceObserver, ObserverError};

/// Observer that republishes a persisted status change onto the three
/// realtime channels: the requester's private channel, the property owner's
/// private channel, and the public updates feed.
pub struct RealtimeDispatcher<B> {
    broadcaster: Arc<B>,
}

impl<B> RealtimeDispatcher<B> {
    pub fn new(broadcaster: Arc<B>) -> Self {
        Self { broadcaster }
    }
}

impl<B> MaintenanceObserver for RealtimeDispatcher<B>
where
    B: Broadcaster,
{
    fn update(
        &self,
        status: MaintenanceStatus,
        snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError> {
        info!(
            request_id = snapshot.request_id,
            status = status.as_str(),
            "dispatching maintenance status change"
        );

        let payload = StatusUpdatePayload::from_snapshot(status, snapshot);
        let channels = [
            MaintenanceChannel::User(snapshot.user_id),
            MaintenanceChannel::Property(snapshot.property_id),
            MaintenanceChannel::Updates,
        ];

        for channel in channels {
            let message = NotificationMessage::status_updated(channel, payload.clone());
            // The triggering connection already knows about the change, so
            // every publish excludes the origin. Transport failures stay on
            // this side of the seam: the status is durable regardless.
            if let Err(err) = self.broadcaster.publish(message, true) {
                warn!(
                    request_id = snapshot.request_id,
                    channel = %channel.name(),
                    error = %err,
                    "realtime publish failed; continuing fan-out"
                );
            }
        }

        Ok(())
    }
}

/// Diagnostic observer recording every transition in the service log.
#[derive(Debug, Default)]
pub struct AuditTrailObserver;

impl MaintenanceObserver for AuditTrailObserver {
    fn update(
        &self,
        status: MaintenanceStatus,
        snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError> {
        info!(
            request_id = snapshot.request_id,
            user_id = snapshot.user_id,
            property_id = snapshot.property_id,
            status = status.as_str(),
            priority = %snapshot.priority,
            "maintenance request status updated"
        );
        Ok(())
    }
}
