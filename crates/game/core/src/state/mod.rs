//! Mutable simulation state: the actor and the funeral records that flow
//! through the ceremony director.
mod actor;
mod common;
mod record;

pub use actor::{Actor, Facing};
pub use common::{GridCell, PixelPos, RecordId, Timestamp};
pub use record::{FALLBACK_INSCRIPTION, FuneralRecord, PendingRecord, fallback_eulogy};
