use crate::application::ports::LocalStore;
use crate::domain::entities::EntityRecord;
use crate::domain::value_objects::{EntityId, EntityKind};
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::storage::rows::EntityRecordRow;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

/// SQLite-backed local store. One table holds every kind, keyed by
/// `(kind, entity_id)`; identifiers are normalized to their canonical
/// decimal string before touching the database, so numeric and string forms
/// of the same id hit the same row.
pub struct SqliteLocalStore {
    pool: ConnectionPool,
}

impl SqliteLocalStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn decode(kind: EntityKind, row: EntityRecordRow) -> Option<EntityRecord> {
        match row.into_record() {
            Ok(record) => Some(record),
            Err(err) => {
                // Unreadable rows are treated as absent, never as a crash.
                tracing::warn!(error = %err, %kind, "skipping unreadable local record");
                None
            }
        }
    }
}

#[async_trait]
impl LocalStore for SqliteLocalStore {
    async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError> {
        let rows = match parent {
            Some(parent_id) => {
                sqlx::query_as::<_, EntityRecordRow>(
                    r#"
                    SELECT data FROM entity_records
                    WHERE kind = ?1 AND parent_id = ?2
                    ORDER BY created_at ASC, rowid ASC
                    "#,
                )
                .bind(kind.as_str())
                .bind(parent_id.to_string())
                .fetch_all(self.pool.get())
                .await?
            }
            None => {
                sqlx::query_as::<_, EntityRecordRow>(
                    r#"
                    SELECT data FROM entity_records
                    WHERE kind = ?1
                    ORDER BY created_at ASC, rowid ASC
                    "#,
                )
                .bind(kind.as_str())
                .fetch_all(self.pool.get())
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| Self::decode(kind, row))
            .collect())
    }

    async fn get(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<Option<EntityRecord>, AppError> {
        let row = sqlx::query_as::<_, EntityRecordRow>(
            "SELECT data FROM entity_records WHERE kind = ?1 AND entity_id = ?2",
        )
        .bind(kind.as_str())
        .bind(id.to_string())
        .fetch_optional(self.pool.get())
        .await?;

        Ok(row.and_then(|row| Self::decode(kind, row)))
    }

    async fn insert(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        let mut record = EntityRecord::new(fields);
        let id = EntityId::generate();
        record.set_id(id);

        sqlx::query(
            r#"
            INSERT INTO entity_records (kind, entity_id, parent_id, data, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(kind.as_str())
        .bind(id.to_string())
        .bind(record.parent_id().map(|p| p.to_string()))
        .bind(serde_json::to_string(&record)?)
        .bind(Utc::now().timestamp_millis())
        .execute(self.pool.get())
        .await?;

        Ok(record)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<Option<EntityRecord>, AppError> {
        let Some(mut record) = self.get(kind, id).await? else {
            return Ok(None);
        };

        record.merge(&patch);
        // A patch never reassigns the identifier.
        record.set_id(id);

        sqlx::query(
            r#"
            UPDATE entity_records
            SET data = ?1, parent_id = ?2
            WHERE kind = ?3 AND entity_id = ?4
            "#,
        )
        .bind(serde_json::to_string(&record)?)
        .bind(record.parent_id().map(|p| p.to_string()))
        .bind(kind.as_str())
        .bind(id.to_string())
        .execute(self.pool.get())
        .await?;

        Ok(Some(record))
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entity_records WHERE kind = ?1 AND entity_id = ?2")
            .bind(kind.as_str())
            .bind(id.to_string())
            .execute(self.pool.get())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert(&self, kind: EntityKind, record: EntityRecord) -> Result<(), AppError> {
        let id = record.id().ok_or_else(|| {
            AppError::Validation(format!("cannot upsert a {kind} record without an id"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO entity_records (kind, entity_id, parent_id, data, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(kind, entity_id) DO UPDATE SET
                parent_id = excluded.parent_id,
                data = excluded.data
            "#,
        )
        .bind(kind.as_str())
        .bind(id.to_string())
        .bind(record.parent_id().map(|p| p.to_string()))
        .bind(serde_json::to_string(&record)?)
        .bind(Utc::now().timestamp_millis())
        .execute(self.pool.get())
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn setup_store() -> SqliteLocalStore {
        let pool = ConnectionPool::in_memory().await.unwrap();
        pool.migrate().await.unwrap();
        SqliteLocalStore::new(pool)
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_round_trips() {
        let store = setup_store().await;

        let record = store
            .insert(EntityKind::Pet, fields(json!({"name": "Rex", "type": "dog"})))
            .await
            .unwrap();
        let id = record.id().expect("assigned id");

        let fetched = store.get(EntityKind::Pet, id).await.unwrap().unwrap();
        assert_eq!(fetched.get("name"), Some(&json!("Rex")));
        assert_eq!(fetched.id(), Some(id));
    }

    #[tokio::test]
    async fn list_filters_by_parent_and_keeps_insertion_order() {
        let store = setup_store().await;

        let pet = store
            .insert(EntityKind::Pet, fields(json!({"name": "Rex"})))
            .await
            .unwrap();
        let pet_id = pet.id().unwrap();

        for title in ["breakfast", "walk", "dinner"] {
            store
                .insert(
                    EntityKind::CareInstruction,
                    fields(json!({"petId": pet_id.as_i64(), "title": title})),
                )
                .await
                .unwrap();
        }
        store
            .insert(
                EntityKind::CareInstruction,
                fields(json!({"petId": 999, "title": "other pet"})),
            )
            .await
            .unwrap();

        let listed = store
            .list(EntityKind::CareInstruction, Some(pet_id))
            .await
            .unwrap();
        let titles: Vec<_> = listed.iter().map(|r| r.get("title").unwrap()).collect();
        assert_eq!(titles, vec!["breakfast", "walk", "dinner"]);
    }

    #[tokio::test]
    async fn update_merges_shallowly_and_misses_return_none() {
        let store = setup_store().await;

        let record = store
            .insert(EntityKind::Pet, fields(json!({"name": "Rex", "age": 3})))
            .await
            .unwrap();
        let id = record.id().unwrap();

        let updated = store
            .update(EntityKind::Pet, id, fields(json!({"age": 4})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("age"), Some(&json!(4)));
        assert_eq!(updated.get("name"), Some(&json!("Rex")));

        let missing = store
            .update(EntityKind::Pet, EntityId::new(1), fields(json!({"age": 9})))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn string_and_numeric_id_forms_hit_the_same_row() {
        let store = setup_store().await;

        let record = store
            .insert(EntityKind::Pet, fields(json!({"name": "Rex"})))
            .await
            .unwrap();
        let id = record.id().unwrap();

        // Same identifier arriving as a serialized string.
        let string_form: EntityId = id.to_string().parse().unwrap();
        let fetched = store.get(EntityKind::Pet, string_form).await.unwrap();
        assert!(fetched.is_some());

        assert!(store.delete(EntityKind::Pet, string_form).await.unwrap());
        assert!(!store.delete(EntityKind::Pet, id).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_rows_are_skipped_not_fatal() {
        let store = setup_store().await;

        store
            .insert(EntityKind::Pet, fields(json!({"name": "Rex"})))
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO entity_records (kind, entity_id, parent_id, data, created_at)
             VALUES ('pet', '42', NULL, 'not json', 0)",
        )
        .execute(store.pool.get())
        .await
        .unwrap();

        let listed = store.list(EntityKind::Pet, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(store
            .get(EntityKind::Pet, EntityId::new(42))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_records() {
        let store = setup_store().await;

        let mut record = EntityRecord::new(fields(json!({"name": "Rex"})));
        record.set_id(EntityId::new(7));
        store.upsert(EntityKind::Pet, record.clone()).await.unwrap();

        let mut newer = EntityRecord::new(fields(json!({"name": "Rexie"})));
        newer.set_id(EntityId::new(7));
        store.upsert(EntityKind::Pet, newer).await.unwrap();

        let fetched = store
            .get(EntityKind::Pet, EntityId::new(7))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.get("name"), Some(&json!("Rexie")));
        assert_eq!(store.list(EntityKind::Pet, None).await.unwrap().len(), 1);
    }
}
