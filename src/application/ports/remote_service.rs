use crate::domain::entities::EntityRecord;
use crate::domain::value_objects::{EntityId, EntityKind};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// The remote service's per-kind CRUD contract.
///
/// Any transport failure, timeout, or non-success status maps to an error;
/// the fallback invoker treats every error as "remote unavailable".
#[async_trait]
pub trait RemoteService: Send + Sync {
    async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError>;

    async fn get(&self, kind: EntityKind, id: EntityId) -> Result<EntityRecord, AppError>;

    async fn create(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError>;

    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<EntityRecord, AppError>;

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), AppError>;

    /// Bounded-latency reachability check. Never errors; anything other than
    /// a recognized healthy response is `false`.
    async fn health_check(&self) -> bool;
}
