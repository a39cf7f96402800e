use crate::application::ports::{LocalStore, RemoteService};
use crate::application::services::fallback::{FallbackInvoker, LocalWrite, ResultSource};
use crate::domain::entities::{EntityRecord, PendingChange};
use crate::domain::value_objects::{ChangeType, EntityId, EntityKind};
use crate::shared::error::AppError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The capability surface application code calls: per-kind CRUD that works
/// whether or not the remote service is reachable.
///
/// Reads try the remote service and fall back to the local store. Writes do
/// the same, and the fallback branch persists locally plus queues a pending
/// change for later reconciliation. When `mirror_reads` is on, successful
/// remote reads are copied into the local store so the data stays available
/// offline.
pub struct EntityService {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteService>,
    invoker: Arc<FallbackInvoker>,
    mirror_reads: bool,
}

impl EntityService {
    pub fn new(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteService>,
        invoker: Arc<FallbackInvoker>,
        mirror_reads: bool,
    ) -> Self {
        Self {
            local,
            remote,
            invoker,
            mirror_reads,
        }
    }

    pub async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError> {
        let (records, source) = self
            .invoker
            .with_read_fallback(self.remote.list(kind, parent), self.local.list(kind, parent))
            .await?;

        if source == ResultSource::Remote && self.mirror_reads {
            self.mirror(kind, &records).await;
        }

        Ok(records)
    }

    pub async fn get(&self, kind: EntityKind, id: EntityId) -> Result<EntityRecord, AppError> {
        let (record, source) = self
            .invoker
            .with_read_fallback(self.remote.get(kind, id), async {
                self.local.get(kind, id).await?.ok_or_else(|| {
                    AppError::NotFound(format!("{kind} {id} not found in local store"))
                })
            })
            .await?;

        if source == ResultSource::Remote && self.mirror_reads {
            self.mirror(kind, std::slice::from_ref(&record)).await;
        }

        Ok(record)
    }

    pub async fn create(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        self.invoker
            .with_mutation_fallback(self.remote.create(kind, fields.clone()), async {
                let record = self.local.insert(kind, fields.clone()).await?;
                let id = record.id().ok_or_else(|| {
                    AppError::Internal(format!("inserted {kind} record is missing an id"))
                })?;
                // The queued snapshot includes the locally assigned id so the
                // replayed create produces the same identifier when the
                // remote service honors client-supplied ids.
                let change =
                    PendingChange::new(kind, ChangeType::Create, id, Some(record.clone()));
                Ok(LocalWrite {
                    value: record,
                    change,
                })
            })
            .await
    }

    pub async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        self.invoker
            .with_mutation_fallback(self.remote.update(kind, id, patch.clone()), async {
                let record = self
                    .local
                    .update(kind, id, patch.clone())
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("{kind} {id} not found in local store"))
                    })?;
                let change = PendingChange::new(
                    kind,
                    ChangeType::Update,
                    id,
                    Some(EntityRecord::new(patch.clone())),
                );
                Ok(LocalWrite {
                    value: record,
                    change,
                })
            })
            .await
    }

    pub async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), AppError> {
        self.invoker
            .with_mutation_fallback(self.remote.delete(kind, id), async {
                // Capture the record before removing it so the delete can
                // still be replayed after the local copy is gone.
                let snapshot = self.local.get(kind, id).await?;
                let removed = self.local.delete(kind, id).await?;
                if !removed {
                    return Err(AppError::NotFound(format!(
                        "{kind} {id} not found in local store"
                    )));
                }
                let change = PendingChange::new(kind, ChangeType::Delete, id, snapshot);
                Ok(LocalWrite {
                    value: (),
                    change,
                })
            })
            .await
    }

    async fn mirror(&self, kind: EntityKind, records: &[EntityRecord]) {
        for record in records {
            if record.id().is_none() {
                continue;
            }
            if let Err(err) = self.local.upsert(kind, record.clone()).await {
                tracing::warn!(error = %err, %kind, "failed to mirror remote record locally");
            }
        }
    }
}
