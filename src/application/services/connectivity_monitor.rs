use crate::application::ports::{RemoteService, StatusStore};
use crate::domain::entities::ConnectivityStatus;
use chrono::Utc;
use std::sync::Arc;

/// Best-effort knowledge of remote reachability.
///
/// The status is updated by periodic probes and, as a side channel, by every
/// remote call the fallback invoker makes: one failed mutation marks the
/// system offline between probes, one success marks it online immediately.
pub struct ConnectivityMonitor {
    remote: Arc<dyn RemoteService>,
    status: Arc<dyn StatusStore>,
}

impl ConnectivityMonitor {
    pub fn new(remote: Arc<dyn RemoteService>, status: Arc<dyn StatusStore>) -> Self {
        Self { remote, status }
    }

    /// Perform a reachability check and persist the outcome. Never errors;
    /// any failure resolves to `false`.
    pub async fn probe(&self) -> bool {
        let online = self.remote.health_check().await;
        self.persist(online).await;
        online
    }

    /// Last persisted status without probing. Absent or unreadable state
    /// reads as the default (online, never checked).
    pub async fn current_status(&self) -> ConnectivityStatus {
        match self.status.load().await {
            Ok(Some(status)) => status,
            Ok(None) => ConnectivityStatus::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load connectivity status");
                ConnectivityStatus::default()
            }
        }
    }

    pub async fn mark_online(&self) {
        self.persist(true).await;
    }

    pub async fn mark_offline(&self) {
        self.persist(false).await;
    }

    async fn persist(&self, is_online: bool) {
        let status = ConnectivityStatus {
            is_online,
            last_checked: Utc::now().timestamp_millis(),
        };
        if let Err(err) = self.status.save(status).await {
            tracing::warn!(error = %err, "failed to persist connectivity status");
        }
    }
}
