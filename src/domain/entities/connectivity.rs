use serde::{Deserialize, Serialize};

/// Last known reachability of the remote service. Best-effort and advisory:
/// it never gates correctness, only which path callers expect to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityStatus {
    pub is_online: bool,
    pub last_checked: i64,
}

impl Default for ConnectivityStatus {
    // Assume online until a probe or a failed call says otherwise.
    fn default() -> Self {
        Self {
            is_online: true,
            last_checked: 0,
        }
    }
}
