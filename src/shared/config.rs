use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub remote: RemoteConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    /// Timeout for regular API calls, in seconds.
    pub request_timeout: u64,
    /// Hard timeout for the connectivity probe, in seconds. Kept short so
    /// UI-facing callers never wait long on an unreachable server.
    pub probe_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
    /// Mirror successful remote reads into the local store so the data is
    /// available for later offline reads.
    pub mirror_reads: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/pawsync.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            remote: RemoteConfig {
                base_url: "http://localhost:3001".to_string(),
                request_timeout: 30,
                probe_timeout: 3,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 30,
                mirror_reads: true,
            },
        }
    }
}
