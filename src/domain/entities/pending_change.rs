use crate::domain::entities::EntityRecord;
use crate::domain::value_objects::{ChangeType, EntityId, EntityKind};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One mutation applied to the local store while the remote service was
/// unreachable. Entries are immutable once created; the reconciler removes
/// them only after the remote service confirms the replayed operation.
///
/// `timestamp` reflects append order and is the sole ordering key during a
/// drain. For deletes, `data` holds the pre-deletion snapshot when the caller
/// could supply one; for creates and updates it is the field set that was
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    pub id: String,
    pub timestamp: i64,
    pub kind: EntityKind,
    pub change_type: ChangeType,
    pub entity_id: EntityId,
    pub data: Option<EntityRecord>,
}

impl PendingChange {
    pub fn new(
        kind: EntityKind,
        change_type: ChangeType,
        entity_id: EntityId,
        data: Option<EntityRecord>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            kind,
            change_type,
            entity_id,
            data,
        }
    }
}
