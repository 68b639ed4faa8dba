//! Simulation results and run timing, in both stream directions.
//!
//! The egress encoder reproduces the pairing the assembler expects on
//! ingest: for every recorded neuron a one-row `target` block immediately
//! followed by its `spike_times` or `trace_<signal>` payload, and one
//! `runtimes` block describing the run's wall-clock breakdown. The decoder
//! is the inverse, collecting the paired blocks back into per-population
//! records.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{PopulationResult, PopulationSignal, RunTimings, SignalTrace, SimulationResult};
pub use encode::{write_result, write_runtimes};
pub use decode::read_results;
