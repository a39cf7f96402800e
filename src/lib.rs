//! Local-first sync engine.
//!
//! Reads and writes go through a fallback invoker that tries the remote
//! service first and falls back to a local SQLite store when it is
//! unreachable. Offline writes are queued in a durable pending-change log
//! and replayed, in order and per entity kind, once connectivity returns.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

mod state;

pub use application::ports::{LocalStore, PendingChangeLog, RemoteService, StatusStore};
pub use application::services::{
    ConnectivityMonitor, EntityService, FallbackInvoker, LocalWrite, ResultSource, SyncService,
};
pub use domain::entities::{
    ConnectivityStatus, EntityRecord, KindPending, PendingChange, SyncReport, SyncStatus,
};
pub use domain::value_objects::{ChangeType, EntityId, EntityKind};
pub use infrastructure::database::ConnectionPool;
pub use infrastructure::remote::HttpRemoteService;
pub use infrastructure::storage::{SqliteChangeLog, SqliteLocalStore, SqliteStatusStore};
pub use shared::{config::AppConfig, error::AppError};
pub use state::AppState;
