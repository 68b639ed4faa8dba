use std::io::Read;

use crate::block::decode::read_block;
use crate::block::Block;
use crate::constants::block_names;
use crate::diag::forward_to_log;
use crate::error::Error;
use crate::matrix::types::Matrix;
use crate::network::types::ProtocolError;
use crate::results::types::{
    PopulationResult, PopulationSignal, RunTimings, SignalTrace, SimulationResult,
};

fn column(m: &Matrix, block: &'static str, field: &'static str) -> Result<usize, ProtocolError> {
    m.header()
        .column_index(field)
        .ok_or(ProtocolError::MissingField { block, field })
}

/// Per-population accumulator keyed by signal name, preserving the order in
/// which signals first appear on the stream.
#[derive(Default)]
struct PopulationAcc {
    signals: Vec<(String, PopulationSignal)>,
}

impl PopulationAcc {
    fn slot(&mut self, key: &str, empty: PopulationSignal) -> &mut PopulationSignal {
        let idx = match self.signals.iter().position(|(name, _)| name == key) {
            Some(i) => i,
            None => {
                self.signals.push((key.to_owned(), empty));
                self.signals.len() - 1
            }
        };
        &mut self.signals[idx].1
    }

    fn push_spikes(&mut self, pid: i32, nid: i32, train: Vec<f32>) -> Result<(), ProtocolError> {
        match self.slot("spikes", PopulationSignal::Spikes(Vec::new())) {
            PopulationSignal::Spikes(trains) => {
                if nid as usize != trains.len() {
                    return Err(ProtocolError::NonSequentialNeuron {
                        block: block_names::SPIKE_TIMES,
                        pid,
                    });
                }
                trains.push(train);
                Ok(())
            }
            // A trace block already claimed the "spikes" signal name.
            PopulationSignal::Trace { .. } => Err(ProtocolError::UnsupportedBlock {
                name: block_names::SPIKE_TIMES.to_owned(),
            }),
        }
    }

    fn push_trace(
        &mut self,
        pid: i32,
        nid: i32,
        signal: &str,
        trace: SignalTrace,
    ) -> Result<(), ProtocolError> {
        let empty = PopulationSignal::Trace { signal: signal.to_owned(), data: Vec::new() };
        match self.slot(signal, empty) {
            PopulationSignal::Trace { data, .. } => {
                if nid as usize != data.len() {
                    return Err(ProtocolError::NonSequentialNeuron {
                        block: block_names::TRACE_PREFIX,
                        pid,
                    });
                }
                data.push(trace);
                Ok(())
            }
            PopulationSignal::Spikes(_) => Err(ProtocolError::UnsupportedBlock {
                name: format!("{}{}", block_names::TRACE_PREFIX, signal),
            }),
        }
    }
}

/// Collect a result stream back into per-population records.
///
/// The inverse of [`write_result`](crate::results::encode::write_result) /
/// [`write_runtimes`](crate::results::encode::write_runtimes): consumes
/// `target` + payload pairs and an optional `runtimes` block until the
/// stream ends cleanly. Log blocks are forwarded to the `log` facade;
/// matrix blocks with names outside the result taxonomy are skipped with a
/// warning.
pub fn read_results<R: Read>(
    r: &mut R,
    population_sizes: &[usize],
) -> Result<SimulationResult, Error> {
    let mut accs: Vec<PopulationAcc> =
        (0..population_sizes.len()).map(|_| PopulationAcc::default()).collect();
    let mut pending_target: Option<(i32, i32)> = None;
    let mut timings: Option<RunTimings> = None;

    while let Some(block) = read_block(r)? {
        let m = match block {
            Block::Log(msg) => {
                forward_to_log(&msg);
                continue;
            }
            Block::Matrix(m) => m,
        };

        match m.name() {
            block_names::TARGET => {
                if m.rows() != 1 {
                    return Err(ProtocolError::TargetNotSingleton { rows: m.rows() }.into());
                }
                let pid = m.get_i32(0, column(&m, block_names::TARGET, "pid")?);
                let nid = m.get_i32(0, column(&m, block_names::TARGET, "nid")?);
                let valid = pid >= 0
                    && (pid as usize) < population_sizes.len()
                    && nid >= 0
                    && (nid as usize) < population_sizes[pid as usize];
                if !valid {
                    return Err(ProtocolError::InvalidTarget { pid, nid }.into());
                }
                pending_target = Some((pid, nid));
            }
            block_names::SPIKE_TIMES => {
                let (pid, nid) = pending_target.take().ok_or(ProtocolError::TargetNotSet)?;
                let col = column(&m, block_names::SPIKE_TIMES, "times")?;
                let train: Vec<f32> =
                    (0..m.rows()).map(|row| m.get_f64(row, col) as f32).collect();
                accs[pid as usize].push_spikes(pid, nid, train)?;
            }
            name if name.starts_with(block_names::TRACE_PREFIX) => {
                let (pid, nid) = pending_target.take().ok_or(ProtocolError::TargetNotSet)?;
                let signal = name[block_names::TRACE_PREFIX.len()..].to_owned();
                let t_col = column(&m, block_names::TRACE_PREFIX, "times")?;
                let v_col = column(&m, block_names::TRACE_PREFIX, "values")?;
                let mut trace = SignalTrace::default();
                for row in 0..m.rows() {
                    trace.times.push(m.get_f64(row, t_col) as f32);
                    trace.values.push(m.get_f64(row, v_col) as f32);
                }
                accs[pid as usize].push_trace(pid, nid, &signal, trace)?;
            }
            block_names::RUNTIMES => {
                timings = Some(RunTimings::from_matrix(&m)?);
                // A timing block ends any open pairing.
                pending_target = None;
            }
            other => {
                log::warn!("skipping unexpected \"{}\" block in result stream", other);
            }
        }
    }

    Ok(SimulationResult {
        populations: accs
            .into_iter()
            .map(|acc| PopulationResult {
                signals: acc.signals.into_iter().map(|(_, s)| s).collect(),
            })
            .collect(),
        timings,
    })
}
