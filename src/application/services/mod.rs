pub mod connectivity_monitor;
pub mod entity_service;
pub mod fallback;
pub mod sync_service;

pub use connectivity_monitor::ConnectivityMonitor;
pub use entity_service::EntityService;
pub use fallback::{FallbackInvoker, LocalWrite, ResultSource};
pub use sync_service::SyncService;
