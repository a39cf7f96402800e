use crate::domain::entities::{EntityRecord, PendingChange};
use crate::domain::value_objects::{ChangeType, EntityId, EntityKind};
use crate::shared::error::AppError;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EntityRecordRow {
    pub data: String,
}

impl EntityRecordRow {
    pub fn into_record(self) -> Result<EntityRecord, AppError> {
        let value = serde_json::from_str(&self.data)?;
        EntityRecord::from_value(value).map_err(AppError::Serialization)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PendingChangeRow {
    pub change_id: String,
    pub entity_kind: String,
    pub change_type: String,
    pub entity_id: String,
    pub data: Option<String>,
    pub created_at: i64,
}

impl PendingChangeRow {
    pub fn into_change(self) -> Result<PendingChange, AppError> {
        let kind: EntityKind = self.entity_kind.parse().map_err(AppError::Serialization)?;
        let change_type: ChangeType = self.change_type.parse().map_err(AppError::Serialization)?;
        let entity_id: EntityId = self.entity_id.parse().map_err(AppError::Serialization)?;
        let data = match self.data {
            Some(raw) => {
                let value = serde_json::from_str(&raw)?;
                Some(EntityRecord::from_value(value).map_err(AppError::Serialization)?)
            }
            None => None,
        };

        Ok(PendingChange {
            id: self.change_id,
            timestamp: self.created_at,
            kind,
            change_type,
            entity_id,
            data,
        })
    }
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct ConnectivityStatusRow {
    pub is_online: bool,
    pub last_checked: i64,
}
