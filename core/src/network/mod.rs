//! Network descriptor assembly.
//!
//! Responsibilities:
//! - The block-name taxonomy and its mandatory-column table
//! - The streaming reducer turning an unordered block stream into one
//!   complete `NetworkDescriptor`
//! - Serializing a descriptor back onto the wire
//!
//! Non-responsibilities:
//! - Neuron/synapse models, backend calls, simulation scheduling

pub mod types;
pub mod assembler;
pub mod encode;

pub use types::{NetworkDescriptor, ProtocolError, SpikeTimes};
pub use assembler::{read_network, NetworkAssembler};
pub use encode::write_network;
