use crate::application::ports::PendingChangeLog;
use crate::application::services::ConnectivityMonitor;
use crate::domain::entities::PendingChange;
use crate::shared::error::AppError;
use std::future::Future;
use std::sync::Arc;

/// Which path produced a read result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Remote,
    LocalFallback,
}

/// A completed local mutation together with the pending change describing it.
/// The invoker appends the change to the log before reporting success, so the
/// two always land together.
pub struct LocalWrite<T> {
    pub value: T,
    pub change: PendingChange,
}

/// The single choke point every read and write passes through: try the
/// remote operation, fall back to the local equivalent on any failure, and
/// keep the connectivity status updated either way.
pub struct FallbackInvoker {
    monitor: Arc<ConnectivityMonitor>,
    log: Arc<dyn PendingChangeLog>,
}

impl FallbackInvoker {
    pub fn new(monitor: Arc<ConnectivityMonitor>, log: Arc<dyn PendingChangeLog>) -> Self {
        Self { monitor, log }
    }

    /// Read path. A remote success marks the system online and returns the
    /// remote result; any remote failure marks it offline and returns the
    /// local result instead. A local failure propagates — there is no
    /// further fallback.
    pub async fn with_fallback<T, R, L>(&self, remote: R, local: L) -> Result<T, AppError>
    where
        R: Future<Output = Result<T, AppError>>,
        L: Future<Output = Result<T, AppError>>,
    {
        self.with_read_fallback(remote, local)
            .await
            .map(|(value, _)| value)
    }

    /// Read path variant that also reports which side answered, so callers
    /// can mirror remote results into the local store.
    pub async fn with_read_fallback<T, R, L>(
        &self,
        remote: R,
        local: L,
    ) -> Result<(T, ResultSource), AppError>
    where
        R: Future<Output = Result<T, AppError>>,
        L: Future<Output = Result<T, AppError>>,
    {
        match remote.await {
            Ok(value) => {
                self.monitor.mark_online().await;
                Ok((value, ResultSource::Remote))
            }
            Err(err) => {
                tracing::debug!(error = %err, "remote read failed, falling back to local store");
                self.monitor.mark_offline().await;
                let value = local.await?;
                Ok((value, ResultSource::LocalFallback))
            }
        }
    }

    /// Write path. Exactly one of the two branches executes: a remote
    /// success never queues a pending change, and the fallback branch queues
    /// exactly one. Once the local write and the log append both succeed the
    /// operation is reported successful even though remote confirmation is
    /// still pending.
    pub async fn with_mutation_fallback<T, R, L>(&self, remote: R, local: L) -> Result<T, AppError>
    where
        R: Future<Output = Result<T, AppError>>,
        L: Future<Output = Result<LocalWrite<T>, AppError>>,
    {
        match remote.await {
            Ok(value) => {
                self.monitor.mark_online().await;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "remote write failed, applying local fallback");
                self.monitor.mark_offline().await;
                let LocalWrite { value, change } = local.await?;
                tracing::info!(
                    kind = %change.kind,
                    change_type = %change.change_type,
                    entity_id = %change.entity_id,
                    "queued offline change"
                );
                self.log.append(change).await?;
                Ok(value)
            }
        }
    }
}
