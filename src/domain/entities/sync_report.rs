use crate::domain::value_objects::EntityKind;
use serde::{Deserialize, Serialize};

/// Outcome of one drain of the pending-change log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Entries confirmed by the remote service and removed from the log.
    pub synced: u32,
    /// Entries the remote service rejected; they stay queued for the next
    /// drain.
    pub failed: u32,
    /// Entries still in the log after the drain.
    pub pending: u32,
    /// True when this call was a no-op because another drain was running.
    pub already_running: bool,
}

/// Snapshot of the engine state surfaced to the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_online: bool,
    pub last_checked: i64,
    pub is_syncing: bool,
    pub last_sync: Option<i64>,
    pub sync_errors: u32,
    pub pending: u32,
    pub pending_by_kind: Vec<KindPending>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindPending {
    pub kind: EntityKind,
    pub pending: u32,
}
