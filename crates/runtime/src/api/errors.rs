//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, map construction and submission
//! validation so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use funeral_core::{MapError, SubmissionError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a text gateway to be configured before building")]
    MissingGateway,

    #[error("frame rate must be positive")]
    InvalidFrameRate,

    #[error("invalid funeral application")]
    InvalidSubmission(#[from] SubmissionError),

    #[error(transparent)]
    Map(#[from] MapError),
}
