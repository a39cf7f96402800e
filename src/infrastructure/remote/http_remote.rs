use crate::application::ports::RemoteService;
use crate::domain::entities::EntityRecord;
use crate::domain::value_objects::{EntityId, EntityKind};
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP implementation of the remote service contract.
///
/// Regular calls share one client with the standard request timeout; the
/// connectivity probe uses a dedicated client with a much shorter timeout so
/// it never holds up UI-facing callers.
pub struct HttpRemoteService {
    client: reqwest::Client,
    probe_client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteService {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        let probe_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout))
            .build()?;

        Ok(Self {
            client,
            probe_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.collection())
    }

    fn record_url(&self, kind: EntityKind, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, kind.collection(), id)
    }

    fn ensure_success(
        kind: EntityKind,
        operation: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AppError> {
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "{operation} {} returned status {}",
                kind.collection(),
                response.status()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteService for HttpRemoteService {
    async fn list(
        &self,
        kind: EntityKind,
        parent: Option<EntityId>,
    ) -> Result<Vec<EntityRecord>, AppError> {
        let mut request = self.client.get(self.collection_url(kind));
        if let Some(parent_id) = parent {
            request = request.query(&[("petId", parent_id.to_string())]);
        }

        let response = Self::ensure_success(kind, "list", request.send().await?)?;
        Ok(response.json().await?)
    }

    async fn get(&self, kind: EntityKind, id: EntityId) -> Result<EntityRecord, AppError> {
        let response = self.client.get(self.record_url(kind, id)).send().await?;
        let response = Self::ensure_success(kind, "get", response)?;
        Ok(response.json().await?)
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        let response = self
            .client
            .post(self.collection_url(kind))
            .json(&fields)
            .send()
            .await?;
        let response = Self::ensure_success(kind, "create", response)?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> Result<EntityRecord, AppError> {
        let response = self
            .client
            .patch(self.record_url(kind, id))
            .json(&patch)
            .send()
            .await?;
        let response = Self::ensure_success(kind, "update", response)?;
        Ok(response.json().await?)
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), AppError> {
        let response = self.client.delete(self.record_url(kind, id)).send().await?;
        Self::ensure_success(kind, "delete", response)?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.probe_client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<HealthResponse>()
                .await
                .map(|health| health.status == "up")
                .unwrap_or(false),
            Ok(response) => {
                tracing::debug!(status = %response.status(), "health endpoint returned non-success");
                false
            }
            Err(err) => {
                tracing::debug!(error = %err, "health probe failed");
                false
            }
        }
    }
}
