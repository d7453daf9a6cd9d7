//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the chapel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use funeral_core::{GameConfig, GameMap};

use crate::api::{Result, RuntimeError, RuntimeHandle, TextGateway};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Movement ticks per second.
    pub frame_rate: u32,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Upper bound on a single text generation call.
    pub gateway_timeout: Duration,
    /// Queue the opening ceremony at startup.
    pub seed_opening_ceremony: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_FRAME_RATE: u32 = 60;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
    pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 32;
    pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            frame_rate: Self::DEFAULT_FRAME_RATE,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER_SIZE,
            gateway_timeout: Self::DEFAULT_GATEWAY_TIMEOUT,
            seed_opening_ceremony: true,
        }
    }
}

/// Main runtime that orchestrates the simulation
///
/// Design: Runtime owns the worker and coordinates teardown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Background worker
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the frame ticker, drops the pending director timer and aborts
    /// outstanding gateway calls. Handles cloned earlier start failing with
    /// [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        match self.handle.stop_worker().await {
            Ok(()) | Err(RuntimeError::CommandChannelClosed) => {}
            Err(other) => return Err(other),
        }
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        tracing::info!("Runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    map: Option<GameMap>,
    gateway: Option<Arc<dyn TextGateway>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            map: None,
            gateway: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the map (defaults to [`GameMap::chapel`])
    pub fn map(mut self, map: GameMap) -> Self {
        self.map = Some(map);
        self
    }

    /// Set the required text gateway
    pub fn gateway(mut self, gateway: impl TextGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Set the required text gateway from a shared instance
    pub fn shared_gateway(mut self, gateway: Arc<dyn TextGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Build the runtime and start its worker
    pub async fn build(self) -> Result<Runtime> {
        let gateway = self.gateway.ok_or(RuntimeError::MissingGateway)?;
        if self.config.frame_rate == 0 {
            return Err(RuntimeError::InvalidFrameRate);
        }
        let map = match self.map {
            Some(map) => map,
            None => GameMap::chapel()?,
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(map, &self.config, gateway, command_rx, event_bus);

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
