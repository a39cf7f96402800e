mod common;

use common::{engine_with_mock, fields};
use pawsync::{AppConfig, AppState, EntityKind};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn probe_persists_the_observed_status() {
    let (state, remote) = engine_with_mock().await;

    assert!(state.connectivity.probe().await);
    let status = state.connectivity.current_status().await;
    assert!(status.is_online);
    assert!(status.last_checked > 0);

    remote.set_online(false);
    assert!(!state.connectivity.probe().await);
    assert!(!state.connectivity.current_status().await.is_online);
}

#[tokio::test]
async fn status_defaults_to_online_before_any_probe() {
    let (state, _remote) = engine_with_mock().await;

    let status = state.connectivity.current_status().await;
    assert!(status.is_online);
    assert_eq!(status.last_checked, 0);
}

#[tokio::test]
async fn one_failed_mutation_marks_the_system_offline_between_probes() {
    let (state, remote) = engine_with_mock().await;

    state.connectivity.probe().await;
    assert!(state.connectivity.current_status().await.is_online);

    remote.set_online(false);
    state
        .entity_service
        .create(EntityKind::Pet, fields(json!({"name": "Rex"})))
        .await
        .unwrap();

    assert!(!state.connectivity.current_status().await.is_online);
}

#[tokio::test]
async fn one_successful_call_marks_the_system_online_again() {
    let (state, remote) = engine_with_mock().await;

    remote.set_online(false);
    state.connectivity.probe().await;
    assert!(!state.connectivity.current_status().await.is_online);

    remote.set_online(true);
    state.entity_service.list(EntityKind::Pet, None).await.unwrap();

    assert!(state.connectivity.current_status().await.is_online);
}

#[tokio::test]
async fn last_known_status_survives_re_wiring_over_the_same_database() {
    let (state, remote) = engine_with_mock().await;

    remote.set_online(false);
    state.connectivity.probe().await;

    // A second engine over the same pool, as after a process restart.
    let reopened = AppState::with_parts(state.pool.clone(), Arc::new(common::MockRemoteService::new()), true)
        .unwrap();
    let status = reopened.connectivity.current_status().await;
    assert!(!status.is_online);
    assert!(status.last_checked > 0);
}

#[tokio::test]
async fn init_migrates_a_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.database.url = format!("sqlite:{}?mode=rwc", dir.path().join("engine.db").display());

    let state = AppState::init(&config).await.unwrap();

    // Fresh database: the migrated tables exist and the engine is usable.
    assert_eq!(state.change_log.count().await.unwrap(), 0);
    assert!(state.connectivity.current_status().await.is_online);
    state.pool.close().await;
}
