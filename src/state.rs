use crate::application::ports::{LocalStore, PendingChangeLog, RemoteService, StatusStore};
use crate::application::services::{
    ConnectivityMonitor, EntityService, FallbackInvoker, SyncService,
};
use crate::infrastructure::database::ConnectionPool;
use crate::infrastructure::remote::HttpRemoteService;
use crate::infrastructure::storage::{SqliteChangeLog, SqliteLocalStore, SqliteStatusStore};
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Fully wired engine state. Every component receives its collaborators
/// explicitly; there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub entity_service: Arc<EntityService>,
    pub sync_service: Arc<SyncService>,
    pub connectivity: Arc<ConnectivityMonitor>,
    pub change_log: Arc<dyn PendingChangeLog>,
    pub pool: ConnectionPool,
}

impl AppState {
    /// Connect to the configured database, run migrations, and wire the
    /// default SQLite + HTTP implementations together.
    pub async fn init(config: &AppConfig) -> Result<Self, AppError> {
        let pool = ConnectionPool::connect(&config.database).await?;
        pool.migrate().await?;

        let remote: Arc<dyn RemoteService> = Arc::new(HttpRemoteService::new(&config.remote)?);
        Self::with_parts(
            pool,
            remote,
            config.sync.mirror_reads,
        )
    }

    /// Wire the engine around an already migrated pool and an arbitrary
    /// remote implementation. Tests use this with a mock remote.
    pub fn with_parts(
        pool: ConnectionPool,
        remote: Arc<dyn RemoteService>,
        mirror_reads: bool,
    ) -> Result<Self, AppError> {
        let local: Arc<dyn LocalStore> = Arc::new(SqliteLocalStore::new(pool.clone()));
        let change_log: Arc<dyn PendingChangeLog> = Arc::new(SqliteChangeLog::new(pool.clone()));
        let status_store: Arc<dyn StatusStore> = Arc::new(SqliteStatusStore::new(pool.clone()));

        let connectivity = Arc::new(ConnectivityMonitor::new(remote.clone(), status_store));
        let invoker = Arc::new(FallbackInvoker::new(
            connectivity.clone(),
            change_log.clone(),
        ));
        let entity_service = Arc::new(EntityService::new(
            local,
            remote.clone(),
            invoker,
            mirror_reads,
        ));
        let sync_service = Arc::new(SyncService::new(
            remote,
            change_log.clone(),
            connectivity.clone(),
        ));

        Ok(Self {
            entity_service,
            sync_service,
            connectivity,
            change_log,
            pool,
        })
    }

    /// Start periodic probing and auto-sync per the configured interval.
    /// Returns the task handle; abort it on teardown.
    pub fn start_auto_sync(&self, config: &AppConfig) -> Option<tokio::task::JoinHandle<()>> {
        if !config.sync.auto_sync {
            return None;
        }
        Some(self.sync_service.schedule(config.sync.sync_interval))
    }
}
