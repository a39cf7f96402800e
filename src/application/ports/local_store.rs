use crate::domain::entities::EntityRecord;
use crate::domain::value_objects::{EntityId, EntityKind};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Durable CRUD over the device-local copy of every entity kind.
///
/// The local copy is a cache plus not-yet-synced writes; the remote service
/// owns the authoritative data. Listing never fails on unreadable rows, it
/// skips them.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// All records of `kind`, optionally scoped to an owning pet, in
    /// insertion order.
    async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError>;

    async fn get(&self, kind: EntityKind, id: EntityId)
        -> Result<Option<EntityRecord>, AppError>;

    /// Persist a new record, assigning a fresh locally generated identifier.
    async fn insert(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError>;

    /// Shallow-merge `patch` into an existing record. Returns `None` when no
    /// record with that identifier exists.
    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<Option<EntityRecord>, AppError>;

    /// Returns whether a record was actually removed.
    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<bool, AppError>;

    /// Insert or overwrite a record that already carries an identifier. Used
    /// to mirror remote reads for later offline use.
    async fn upsert(&self, kind: EntityKind, record: EntityRecord) -> Result<(), AppError>;
}
