mod connectivity;
mod pending_change;
mod record;
mod sync_report;

pub use connectivity::ConnectivityStatus;
pub use pending_change::PendingChange;
pub use record::{EntityRecord, ID_FIELD, PARENT_FIELD};
pub use sync_report::{KindPending, SyncReport, SyncStatus};
