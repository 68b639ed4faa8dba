//! Top-level error aggregate.
//!
//! Each layer owns its error enum; this type folds them into one failure
//! channel for the stream-driving entry points. Every variant is fatal to
//! the current stream: resynchronization only recovers at block boundaries,
//! so nothing below a whole block is retryable.

use thiserror::Error;

use crate::framing::types::FrameError;
use crate::matrix::types::MatrixError;
use crate::network::types::ProtocolError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Framing(#[from] FrameError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
