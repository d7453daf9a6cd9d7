//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use funeral_core::{GameMap, GridCell, Interactable, InteractableKind, MapBuilder, TileKind};
use funeral_runtime::{Event, GatewayError, Runtime, RuntimeConfig, TextGateway};
use tokio::sync::broadcast;

/// Longest a test waits for a single event.
pub const EVENT_DEADLINE: Duration = Duration::from_secs(120);

/// Default configuration without the opening ceremony.
pub fn quiet_config() -> RuntimeConfig {
    RuntimeConfig {
        seed_opening_ceremony: false,
        ..RuntimeConfig::default()
    }
}

/// 5x5 floor with the player spawning at (2,2) and one interactable
/// directly north of it, 48 px from the player's centre.
pub fn room_with(kind: InteractableKind, tile: TileKind, message: Option<&str>) -> GameMap {
    let mut target = Interactable::new(format!("{kind}"), kind);
    if let Some(message) = message {
        target = target.with_message(message);
    }

    let mut builder = MapBuilder::new(5, 5, TileKind::Floor).unwrap();
    builder
        .place_interactable(GridCell::new(2, 1), tile, target)
        .unwrap()
        .spawn(GridCell::new(2, 2))
        .unwrap();
    builder.build().unwrap()
}

pub async fn start(map: Option<GameMap>, gateway: impl TextGateway + 'static) -> Runtime {
    start_with(quiet_config(), map, gateway).await
}

pub async fn start_with(
    config: RuntimeConfig,
    map: Option<GameMap>,
    gateway: impl TextGateway + 'static,
) -> Runtime {
    let mut builder = Runtime::builder().config(config).gateway(gateway);
    if let Some(map) = map {
        builder = builder.map(map);
    }
    builder.build().await.expect("runtime should start")
}

/// Receives until `pick` accepts an event.
pub async fn next_matching<T>(
    rx: &mut broadcast::Receiver<Event>,
    mut pick: impl FnMut(Event) -> Option<T>,
) -> T {
    tokio::time::timeout(EVENT_DEADLINE, async {
        loop {
            let event = rx.recv().await.expect("event stream should stay open");
            if let Some(found) = pick(event) {
                return found;
            }
        }
    })
    .await
    .expect("expected event never arrived")
}

/// Gateway that always fails.
pub struct RefusingGateway;

#[async_trait]
impl TextGateway for RefusingGateway {
    async fn generate_eulogy(&self, _: &str, _: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Rejected("quota exceeded".to_string()))
    }

    async fn generate_inscription(&self) -> Result<String, GatewayError> {
        Err(GatewayError::Rejected("quota exceeded".to_string()))
    }
}

/// Gateway that never answers.
pub struct StalledGateway;

#[async_trait]
impl TextGateway for StalledGateway {
    async fn generate_eulogy(&self, _: &str, _: &str) -> Result<String, GatewayError> {
        std::future::pending().await
    }

    async fn generate_inscription(&self) -> Result<String, GatewayError> {
        std::future::pending().await
    }
}
