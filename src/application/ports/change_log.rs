use crate::domain::entities::PendingChange;
use crate::domain::value_objects::EntityKind;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable, append-only log of writes that took the local fallback path.
///
/// Entries are consumed in timestamp order and are never merged or
/// coalesced: a create followed by an update to the same unsynced identifier
/// stays two separate entries and replays as two remote calls.
#[async_trait]
pub trait PendingChangeLog: Send + Sync {
    async fn append(&self, change: PendingChange) -> Result<(), AppError>;

    async fn remove(&self, change_id: &str) -> Result<(), AppError>;

    /// All entries, timestamp ascending.
    async fn list_all(&self) -> Result<Vec<PendingChange>, AppError>;

    /// Entries for one kind, timestamp ascending.
    async fn list_by_kind(&self, kind: EntityKind) -> Result<Vec<PendingChange>, AppError>;

    async fn count(&self) -> Result<u32, AppError>;

    async fn count_by_kind(&self, kind: EntityKind) -> Result<u32, AppError>;

    /// Administrative reset; drops every queued entry.
    async fn clear(&self) -> Result<(), AppError>;
}
