pub mod change_log;
pub mod local_store;
pub mod remote_service;
pub mod status_store;

pub use change_log::PendingChangeLog;
pub use local_store::LocalStore;
pub use remote_service::RemoteService;
pub use status_store::StatusStore;
