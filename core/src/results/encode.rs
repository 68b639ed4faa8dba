use std::io::Write;

use crate::block::encode::write_matrix;
use crate::constants::block_names;
use crate::error::Error;
use crate::matrix::types::{Matrix, MatrixError, MatrixHeader};
use crate::network::encode::target_matrix;
use crate::results::types::{PopulationResult, PopulationSignal, RunTimings, SignalTrace};
use crate::types::ScalarType;

/// Single-column float matrix of spike times.
fn spike_times_matrix(times: &[f32]) -> Result<Matrix, MatrixError> {
    let header = MatrixHeader::from_pairs(&[("times", ScalarType::Float32)])?;
    let mut data = Vec::with_capacity(times.len() * 4);
    for t in times {
        data.extend_from_slice(&t.to_le_bytes());
    }
    Matrix::from_raw(block_names::SPIKE_TIMES, header, times.len(), data)
}

/// Two-column float matrix of one neuron's trace samples.
fn trace_matrix(signal: &str, trace: &SignalTrace) -> Result<Matrix, MatrixError> {
    if trace.times.len() != trace.values.len() {
        return Err(MatrixError::SizeMismatch {
            expected: trace.times.len(),
            actual: trace.values.len(),
        });
    }
    let header = MatrixHeader::from_pairs(&[
        ("times", ScalarType::Float32),
        ("values", ScalarType::Float32),
    ])?;
    let mut data = Vec::with_capacity(trace.times.len() * 8);
    for (t, v) in trace.times.iter().zip(&trace.values) {
        data.extend_from_slice(&t.to_le_bytes());
        data.extend_from_slice(&v.to_le_bytes());
    }
    Matrix::from_raw(
        format!("{}{}", block_names::TRACE_PREFIX, signal),
        header,
        trace.times.len(),
        data,
    )
}

/// Serialize the recorded signals of all populations.
///
/// For each population, for each recorded signal, for each neuron, a
/// one-row `target` block is emitted immediately before the payload block,
/// reproducing the pairing the ingest side expects.
pub fn write_result<W: Write>(w: &mut W, results: &[PopulationResult]) -> Result<(), Error> {
    for (pid, pop) in results.iter().enumerate() {
        for signal in &pop.signals {
            match signal {
                PopulationSignal::Spikes(trains) => {
                    for (nid, train) in trains.iter().enumerate() {
                        write_matrix(w, &target_matrix(pid as i32, nid as i32)?)?;
                        write_matrix(w, &spike_times_matrix(train)?)?;
                    }
                }
                PopulationSignal::Trace { signal, data } => {
                    for (nid, trace) in data.iter().enumerate() {
                        write_matrix(w, &target_matrix(pid as i32, nid as i32)?)?;
                        write_matrix(w, &trace_matrix(signal, trace)?)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Serialize one `runtimes` block: a single row of four float64 columns.
pub fn write_runtimes<W: Write>(w: &mut W, timings: &RunTimings) -> Result<(), Error> {
    let header = MatrixHeader::from_pairs(&[
        ("total", ScalarType::Float64),
        ("sim", ScalarType::Float64),
        ("initialize", ScalarType::Float64),
        ("finalize", ScalarType::Float64),
    ])?;
    let mut data = Vec::with_capacity(32);
    for v in [timings.total, timings.sim, timings.initialize, timings.finalize] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    let m = Matrix::from_raw(block_names::RUNTIMES, header, 1, data)?;
    write_matrix(w, &m)
}
