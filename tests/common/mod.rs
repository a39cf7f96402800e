#![allow(dead_code)] // not every test binary uses every helper

use async_trait::async_trait;
use pawsync::{
    AppError, AppState, ConnectionPool, EntityId, EntityKind, EntityRecord, RemoteService,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call observed by the mock remote, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List(EntityKind),
    Get(EntityKind, EntityId),
    Create(EntityKind, EntityId),
    Update(EntityKind, EntityId),
    Delete(EntityKind, EntityId),
}

/// Stateful in-memory stand-in for the remote service. Toggling `online`
/// simulates the server becoming unreachable; `reject_writes` simulates a
/// reachable server rejecting replayed mutations.
pub struct MockRemoteService {
    online: Mutex<bool>,
    reject_writes: Mutex<bool>,
    call_delay: Mutex<Option<Duration>>,
    records: Mutex<HashMap<(EntityKind, EntityId), EntityRecord>>,
    calls: Mutex<Vec<RemoteCall>>,
    next_id: AtomicI64,
}

impl MockRemoteService {
    pub fn new() -> Self {
        Self {
            online: Mutex::new(true),
            reject_writes: Mutex::new(false),
            call_delay: Mutex::new(None),
            records: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }

    pub fn set_online(&self, online: bool) {
        *self.online.lock().unwrap() = online;
    }

    pub fn set_reject_writes(&self, reject: bool) {
        *self.reject_writes.lock().unwrap() = reject;
    }

    /// Delay every remote call, to widen race windows in concurrency tests.
    pub fn set_call_delay(&self, delay: Duration) {
        *self.call_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn record(&self, kind: EntityKind, id: EntityId) -> Option<EntityRecord> {
        self.records.lock().unwrap().get(&(kind, id)).cloned()
    }

    pub fn seed(&self, kind: EntityKind, record: EntityRecord) {
        let id = record.id().expect("seeded record needs an id");
        self.records.lock().unwrap().insert((kind, id), record);
    }

    async fn observe(&self, call: RemoteCall) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);

        let delay = *self.call_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if !*self.online.lock().unwrap() {
            return Err(AppError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), AppError> {
        if *self.reject_writes.lock().unwrap() {
            return Err(AppError::Network(
                "server returned status 500".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteService for MockRemoteService {
    async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError> {
        self.observe(RemoteCall::List(kind)).await?;

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|((k, _), record)| {
                *k == kind && parent.map(|p| record.parent_id() == Some(p)).unwrap_or(true)
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get(&self, kind: EntityKind, id: EntityId) -> Result<EntityRecord, AppError> {
        self.observe(RemoteCall::Get(kind, id)).await?;

        self.records
            .lock()
            .unwrap()
            .get(&(kind, id))
            .cloned()
            .ok_or_else(|| AppError::Network(format!("get {kind} returned status 404")))
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        let mut record = EntityRecord::new(fields);
        // Like json-server: honor a client-supplied id, assign otherwise.
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = EntityId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                record.set_id(id);
                id
            }
        };

        self.observe(RemoteCall::Create(kind, id)).await?;
        self.ensure_writable()?;

        self.records
            .lock()
            .unwrap()
            .insert((kind, id), record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        self.observe(RemoteCall::Update(kind, id)).await?;
        self.ensure_writable()?;

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&(kind, id))
            .ok_or_else(|| AppError::Network(format!("update {kind} returned status 404")))?;
        record.merge(&patch);
        Ok(record.clone())
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), AppError> {
        self.observe(RemoteCall::Delete(kind, id)).await?;
        self.ensure_writable()?;

        // Deleting an already deleted record is tolerated so replays stay
        // idempotent.
        self.records.lock().unwrap().remove(&(kind, id));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        *self.online.lock().unwrap()
    }
}

/// Engine wired over an in-memory database and the mock remote.
pub async fn engine_with_mock() -> (AppState, Arc<MockRemoteService>) {
    let pool = ConnectionPool::in_memory().await.expect("in-memory pool");
    pool.migrate().await.expect("migrations");

    let remote = Arc::new(MockRemoteService::new());
    let state = AppState::with_parts(pool, remote.clone(), true).expect("wire engine");
    (state, remote)
}

pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
