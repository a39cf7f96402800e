mod rows;
mod sqlite_change_log;
mod sqlite_local_store;
mod sqlite_status_store;

pub use sqlite_change_log::SqliteChangeLog;
pub use sqlite_local_store::SqliteLocalStore;
pub use sqlite_status_store::SqliteStatusStore;
