use serde::{Deserialize, Serialize};

use crate::matrix::types::Matrix;
use crate::network::types::ProtocolError;

/// Sampled analog signal of one neuron: time stamps and values, row-major
/// on the wire as a two-column float matrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalTrace {
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}

/// One recorded signal of one population, covering its neurons in index
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulationSignal {
    /// Spike trains, one per neuron.
    Spikes(Vec<Vec<f32>>),
    /// Analog traces, one per neuron.
    Trace { signal: String, data: Vec<SignalTrace> },
}

/// All recorded signals of one population.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopulationResult {
    pub signals: Vec<PopulationSignal>,
}

/// Decoded result stream: per-population records plus the run timing, if
/// the peer sent one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationResult {
    pub populations: Vec<PopulationResult>,
    pub timings: Option<RunTimings>,
}

/// Wall-clock breakdown of one run, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunTimings {
    pub total: f64,
    pub sim: f64,
    pub initialize: f64,
    pub finalize: f64,
}

impl RunTimings {
    /// Extract the timing breakdown from a decoded `runtimes` block.
    pub fn from_matrix(m: &Matrix) -> Result<Self, ProtocolError> {
        if m.rows() != 1 {
            return Err(ProtocolError::BadRowCount {
                block: crate::constants::block_names::RUNTIMES,
                expected: 1,
                actual: m.rows(),
            });
        }
        let col = |field| {
            m.header().column_index(field).ok_or(ProtocolError::MissingField {
                block: crate::constants::block_names::RUNTIMES,
                field,
            })
        };
        Ok(Self {
            total: m.get_f64(0, col("total")?),
            sim: m.get_f64(0, col("sim")?),
            initialize: m.get_f64(0, col("initialize")?),
            finalize: m.get_f64(0, col("finalize")?),
        })
    }

    /// JSON snapshot for diagnostics.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "total": self.total,
            "sim": self.sim,
            "initialize": self.initialize,
            "finalize": self.finalize,
        })
    }
}
