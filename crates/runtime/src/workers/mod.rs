//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the single owner of chapel state; gateway calls
//! run as child tasks it spawns and reaps.

mod simulation;

pub use simulation::{Command, SimulationWorker};
