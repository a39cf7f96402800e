use crate::application::ports::PendingChangeLog;
use crate::domain::entities::PendingChange;
use crate::domain::value_objects::EntityKind;
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::storage::rows::PendingChangeRow;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// SQLite-backed pending-change log. Append-only apart from per-entry
/// removal on confirmed sync and the administrative `clear`.
pub struct SqliteChangeLog {
    pool: ConnectionPool,
}

impl SqliteChangeLog {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn decode(rows: Vec<PendingChangeRow>) -> Vec<PendingChange> {
        rows.into_iter()
            .filter_map(|row| match row.into_change() {
                Ok(change) => Some(change),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable pending change");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl PendingChangeLog for SqliteChangeLog {
    async fn append(&self, change: PendingChange) -> Result<(), AppError> {
        let data = change
            .data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO pending_changes (
                change_id, entity_kind, change_type, entity_id, data, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&change.id)
        .bind(change.kind.as_str())
        .bind(change.change_type.as_str())
        .bind(change.entity_id.to_string())
        .bind(data)
        .bind(change.timestamp)
        .execute(self.pool.get())
        .await?;

        Ok(())
    }

    async fn remove(&self, change_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pending_changes WHERE change_id = ?1")
            .bind(change_id)
            .execute(self.pool.get())
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PendingChange>, AppError> {
        let rows = sqlx::query_as::<_, PendingChangeRow>(
            r#"
            SELECT change_id, entity_kind, change_type, entity_id, data, created_at
            FROM pending_changes
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(self.pool.get())
        .await?;

        Ok(Self::decode(rows))
    }

    async fn list_by_kind(&self, kind: EntityKind) -> Result<Vec<PendingChange>, AppError> {
        let rows = sqlx::query_as::<_, PendingChangeRow>(
            r#"
            SELECT change_id, entity_kind, change_type, entity_id, data, created_at
            FROM pending_changes
            WHERE entity_kind = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(self.pool.get())
        .await?;

        Ok(Self::decode(rows))
    }

    async fn count(&self) -> Result<u32, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pending_changes")
            .fetch_one(self.pool.get())
            .await?;

        Ok(count as u32)
    }

    async fn count_by_kind(&self, kind: EntityKind) -> Result<u32, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pending_changes WHERE entity_kind = ?1")
                .bind(kind.as_str())
                .fetch_one(self.pool.get())
                .await?;

        Ok(count as u32)
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pending_changes")
            .execute(self.pool.get())
            .await?;

        Ok(())
    }
}
