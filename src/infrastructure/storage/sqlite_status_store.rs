use crate::application::ports::StatusStore;
use crate::domain::entities::ConnectivityStatus;
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::storage::rows::ConnectivityStatusRow;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Single-row persistence for the last known connectivity status.
pub struct SqliteStatusStore {
    pool: ConnectionPool,
}

impl SqliteStatusStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for SqliteStatusStore {
    async fn load(&self) -> Result<Option<ConnectivityStatus>, AppError> {
        let row = sqlx::query_as::<_, ConnectivityStatusRow>(
            "SELECT is_online, last_checked FROM connectivity_status WHERE id = 1",
        )
        .fetch_optional(self.pool.get())
        .await?;

        Ok(row.map(|row| ConnectivityStatus {
            is_online: row.is_online,
            last_checked: row.last_checked,
        }))
    }

    async fn save(&self, status: ConnectivityStatus) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO connectivity_status (id, is_online, last_checked)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                is_online = excluded.is_online,
                last_checked = excluded.last_checked
            "#,
        )
        .bind(status.is_online)
        .bind(status.last_checked)
        .execute(self.pool.get())
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> SqliteStatusStore {
        let pool = ConnectionPool::in_memory().await.unwrap();
        pool.migrate().await.unwrap();
        SqliteStatusStore::new(pool)
    }

    #[tokio::test]
    async fn loads_none_before_any_save() {
        let store = setup_store().await;
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_the_single_row() {
        let store = setup_store().await;

        store
            .save(ConnectivityStatus {
                is_online: false,
                last_checked: 100,
            })
            .await
            .unwrap();
        store
            .save(ConnectivityStatus {
                is_online: true,
                last_checked: 200,
            })
            .await
            .unwrap();

        let status = store.load().await.unwrap().unwrap();
        assert!(status.is_online);
        assert_eq!(status.last_checked, 200);
    }
}
