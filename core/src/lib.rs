//! binnf-core
//!
//! Pure Rust codec for the binnf block protocol: a self-describing,
//! resynchronizable binary framing format exchanging spiking-network
//! descriptions, simulation results and diagnostics between two processes
//! over a single byte stream (pipe, FIFO or file; the file format is
//! byte-identical to the wire format).
//!
//! The stream is the only synchronization primitive: one writer, one
//! reader, no multiplexing identifiers, no protocol-level timeouts. Every
//! block is fully materialized before it is validated and returned.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod error;

// Wire layers
pub mod framing;
pub mod matrix;
pub mod diag;
pub mod block;

// Stream semantics
pub mod network;
pub mod results;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::block::{read_block, write_block, write_log, write_matrix, Block};
    pub use crate::constants::ALL_NEURONS;
    pub use crate::diag::{LogMessage, Severity};
    pub use crate::error::Error;
    pub use crate::matrix::{Column, Matrix, MatrixHeader};
    pub use crate::network::{read_network, write_network, NetworkAssembler, NetworkDescriptor};
    pub use crate::results::{read_results, write_result, write_runtimes, RunTimings};
    pub use crate::types::{Scalar, ScalarType};
}
