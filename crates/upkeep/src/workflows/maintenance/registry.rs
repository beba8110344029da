use super::domain::{MaintenanceSnapshot, MaintenanceStatus};

/// Stable identifier for an observer's concrete behavior. The registry keys
/// on this, not on instance identity, so each behavior runs at most once per
/// status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    AuditTrail,
    Realtime,
}

impl ObserverKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AuditTrail => "audit_trail",
            Self::Realtime => "realtime",
        }
    }
}

/// Subscriber invoked after a status change has been durably saved.
pub trait MaintenanceObserver: Send + Sync {
    fn update(
        &self,
        status: MaintenanceStatus,
        snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError>;
}

/// Failure raised by an observer during fan-out. The triggering status change
/// is already persisted by the time this can occur.
#[derive(Debug, thiserror::Error)]
#[error("observer '{}' failed: {}", .kind.label(), .message)]
pub struct ObserverError {
    pub kind: ObserverKind,
    pub message: String,
}

impl ObserverError {
    pub fn new(kind: ObserverKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Insertion-ordered observer collection owned by exactly one subject
/// instance. Owning it per instance (instead of sharing process-wide state)
/// keeps concurrent status changes on different requests from seeing each
/// other's registrations.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Vec<(ObserverKind, Box<dyn MaintenanceObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` under `kind` unless that kind is already present.
    /// A duplicate attach is silently ignored; the first registration stays
    /// authoritative until detached.
    pub fn attach(&mut self, kind: ObserverKind, observer: Box<dyn MaintenanceObserver>) -> bool {
        if self.entries.iter().any(|(existing, _)| *existing == kind) {
            return false;
        }
        self.entries.push((kind, observer));
        true
    }

    /// Removes the observer registered under `kind`, if any.
    pub fn detach(&mut self, kind: ObserverKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != kind);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes every observer in registration order. The first failure aborts
    /// the remaining fan-out; observers are not isolated from one another.
    pub fn notify_all(
        &self,
        status: MaintenanceStatus,
        snapshot: &MaintenanceSnapshot,
    ) -> Result<(), ObserverError> {
        for (_, observer) in &self.entries {
            observer.update(status, snapshot)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field(
                "kinds",
                &self
                    .entries
                    .iter()
                    .map(|(kind, _)| kind.label())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
