use crate::infra::InMemoryMaintenanceRepository;
use clap::Args;
use std::sync::Arc;
use upkeep::error::AppError;
use upkeep::workflows::maintenance::{
    MaintenanceDraft, MaintenanceService, MaintenanceStatus, RealtimeHub,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Requester id used for the demo request
    #[arg(long, default_value_t = 7)]
    pub(crate) user_id: i64,
    /// Property id used for the demo request
    #[arg(long, default_value_t = 3)]
    pub(crate) property_id: i64,
    /// Title of the demo request
    #[arg(long, default_value = "Leaking kitchen faucet")]
    pub(crate) title: String,
    /// Priority label; omitted by default so the MEDIUM fallback shows up
    #[arg(long)]
    pub(crate) priority: Option<String>,
}

/// Drives one request through the full lifecycle and prints every message the
/// realtime hub would deliver to connected subscribers.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let hub = RealtimeHub::new(64);
    let mut feed = hub.subscribe();

    let repository = Arc::new(InMemoryMaintenanceRepository::default());
    let service = MaintenanceService::new(repository, Arc::new(hub));

    let stored = service.open(MaintenanceDraft {
        user_id: args.user_id,
        property_id: args.property_id,
        title: args.title,
        description: "Reported through the upkeep demo walkthrough".to_string(),
        priority: args.priority,
        notes: None,
    })?;

    println!(
        "Opened maintenance request #{} for user {} at property {} (status {})",
        stored.id, stored.user_id, stored.property_id, stored.status.as_str()
    );

    for status in [
        MaintenanceStatus::Reviewed,
        MaintenanceStatus::InProgress,
        MaintenanceStatus::Completed,
    ] {
        let updated = service.set_status(stored.id, status.as_str())?;
        println!("\n== transition to {} ==", updated.status.as_str());
        while let Ok(message) = feed.try_recv() {
            let audience = if message.channel.starts_with("maintenance.user.") {
                "requester"
            } else if message.channel.starts_with("maintenance.property.") {
                "property owner"
            } else {
                "public feed"
            };
            println!(
                "  [{}] {} -> {} (priority {})",
                audience,
                message.event,
                message.channel,
                message.payload.priority
            );
        }
    }

    let finished = service.get(stored.id)?;
    println!(
        "\nRequest #{} finished as {} (completed_at: {})",
        finished.id,
        finished.status.as_str(),
        finished
            .completed_at
            .map(|stamp| stamp.to_rfc3339())
            .unwrap_or_else(|| "-".to_string())
    );

    Ok(())
}
