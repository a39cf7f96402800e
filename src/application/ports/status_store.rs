use crate::domain::entities::ConnectivityStatus;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Persistence for the last known connectivity status, so it survives a
/// process restart.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn load(&self) -> Result<Option<ConnectivityStatus>, AppError>;

    async fn save(&self, status: ConnectivityStatus) -> Result<(), AppError>;
}
