use std::io::Read;

use crate::block::decode::read_block;
use crate::block::Block;
use crate::constants::{block_names, ALL_NEURONS};
use crate::diag::forward_to_log;
use crate::error::Error;
use crate::matrix::types::Matrix;
use crate::network::types::{NetworkDescriptor, ProtocolError, SpikeTimes};

/// Mandatory columns per block name. Existence is checked; scalar kinds and
/// byte offsets are not.
const MANDATORY_FIELDS: &[(&str, &[&str])] = &[
    (block_names::POPULATIONS, &["count", "type"]),
    (block_names::PARAMETERS, &["pid", "nid"]),
    (block_names::TARGET, &["pid", "nid"]),
    (block_names::SPIKE_TIMES, &["times"]),
    (block_names::SIGNALS, &[]),
    (block_names::LIST_CONNECTION, &["nid_src", "nid_tar", "weight", "delay"]),
    (block_names::LIST_CONNECTION_HEADER, &["pid_src", "pid_tar", "inh", "file"]),
    (block_names::GROUP_CONNECTIONS, &[
        "pid_src", "nid_src_start", "nid_src_end",
        "pid_tar", "nid_tar_start", "nid_tar_end",
        "connector_id", "weight", "delay", "parameter",
    ]),
];

/// Check the mandatory-column table for a block name known to be in it.
fn check_mandatory_fields(m: &Matrix) -> Result<(), ProtocolError> {
    for &(block, fields) in MANDATORY_FIELDS {
        if block == m.name() {
            for &field in fields {
                if !m.header().has_column(field) {
                    return Err(ProtocolError::MissingField { block, field });
                }
            }
            return Ok(());
        }
    }
    Err(ProtocolError::UnsupportedBlock { name: m.name().to_owned() })
}

/// Streaming reducer from matrix blocks to one network descriptor.
///
/// Blocks may arrive in any order the taxonomy permits; the only sequencing
/// constraint is the `target` / `spike_times` pairing, which is tracked in
/// `pending_target` and consumed once used.
#[derive(Debug, Default)]
pub struct NetworkAssembler {
    populations: Option<Matrix>,
    parameters: Vec<Matrix>,
    spike_times: Vec<SpikeTimes>,
    list_connections: Vec<Matrix>,
    list_connection_header: Option<Matrix>,
    group_connections: Option<Matrix>,
    signals: Vec<Matrix>,
    pending_target: Option<(i32, i32)>,
}

impl NetworkAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one matrix block into the descriptor under construction.
    pub fn consume(&mut self, m: Matrix) -> Result<(), ProtocolError> {
        check_mandatory_fields(&m)?;
        log::trace!("assembling \"{}\" block ({} rows)", m.name(), m.rows());

        match m.name() {
            block_names::POPULATIONS => {
                store_singleton(&mut self.populations, block_names::POPULATIONS, m)
            }
            block_names::LIST_CONNECTION_HEADER => store_singleton(
                &mut self.list_connection_header,
                block_names::LIST_CONNECTION_HEADER,
                m,
            ),
            block_names::GROUP_CONNECTIONS => store_singleton(
                &mut self.group_connections,
                block_names::GROUP_CONNECTIONS,
                m,
            ),
            block_names::PARAMETERS => {
                self.parameters.push(m);
                Ok(())
            }
            block_names::SIGNALS => {
                self.signals.push(m);
                Ok(())
            }
            block_names::LIST_CONNECTION => {
                self.list_connections.push(m);
                Ok(())
            }
            block_names::TARGET => {
                if m.rows() != 1 {
                    return Err(ProtocolError::TargetNotSingleton { rows: m.rows() });
                }
                let pid_col = m.header().column_index("pid").unwrap_or(0);
                let nid_col = m.header().column_index("nid").unwrap_or(0);
                self.pending_target = Some((m.get_i32(0, pid_col), m.get_i32(0, nid_col)));
                Ok(())
            }
            block_names::SPIKE_TIMES => {
                let (pid, nid) =
                    self.pending_target.take().ok_or(ProtocolError::TargetNotSet)?;
                self.spike_times.push(SpikeTimes { pid, nid, times: m });
                Ok(())
            }
            other => Err(ProtocolError::UnsupportedBlock { name: other.to_owned() }),
        }
    }

    /// Materialize the descriptor, running the validations that need the
    /// whole stream: the populations singleton and the pid/nid contiguity
    /// runs of parameter and spike-time matrices.
    pub fn finish(self) -> Result<NetworkDescriptor, ProtocolError> {
        let populations = self.populations.ok_or(ProtocolError::MissingPopulations)?;

        if let Some((pid, nid)) = self.pending_target {
            // Dangling pairing at end of stream; both original endpoints
            // drop it, so we do too.
            log::debug!("discarding unconsumed target ({}, {})", pid, nid);
        }

        let descriptor = NetworkDescriptor {
            populations,
            parameters: self.parameters,
            spike_times: self.spike_times,
            list_connections: self.list_connections,
            list_connection_header: self.list_connection_header,
            group_connections: self.group_connections,
            signals: self.signals,
        };

        let counts = descriptor.population_sizes();
        for ps in &descriptor.parameters {
            let pid_col = ps.header().column_index("pid").unwrap_or(0);
            let nid_col = ps.header().column_index("nid").unwrap_or(0);
            let keys =
                (0..ps.rows()).map(|r| (ps.get_i32(r, pid_col), ps.get_i32(r, nid_col)));
            check_population_runs(keys, &counts, block_names::PARAMETERS)?;
        }
        let keys = descriptor.spike_times.iter().map(|st| (st.pid, st.nid));
        check_population_runs(keys, &counts, block_names::SPIKE_TIMES)?;

        Ok(descriptor)
    }
}

fn store_singleton(
    slot: &mut Option<Matrix>,
    name: &'static str,
    m: Matrix,
) -> Result<(), ProtocolError> {
    if slot.is_some() {
        return Err(ProtocolError::DuplicateBlock { name });
    }
    *slot = Some(m);
    Ok(())
}

/// Validate a `(pid, nid)` key sequence: rows sharing one pid form a single
/// contiguous run which either covers the population's neurons exactly with
/// strictly increasing indices starting at zero, or is one ALL_NEURONS row.
fn check_population_runs(
    keys: impl Iterator<Item = (i32, i32)>,
    counts: &[i32],
    block: &'static str,
) -> Result<(), ProtocolError> {
    let keys: Vec<(i32, i32)> = keys.collect();
    let mut seen: Vec<i32> = Vec::new();
    let mut begin = 0;
    while begin < keys.len() {
        let pid = keys[begin].0;
        let mut end = begin + 1;
        while end < keys.len() && keys[end].0 == pid {
            end += 1;
        }

        if pid < 0 || pid as usize >= counts.len() {
            return Err(ProtocolError::InvalidPopulation { pid });
        }
        if seen.contains(&pid) {
            return Err(ProtocolError::NonContiguousRun { block, pid });
        }
        seen.push(pid);

        let run = &keys[begin..end];
        if run[0].1 == ALL_NEURONS {
            if run.len() != 1 {
                return Err(ProtocolError::AllNeuronsNotSingleton { block, pid });
            }
        } else {
            let expected = counts[pid as usize];
            if run.len() as i32 != expected {
                return Err(ProtocolError::RunCountMismatch {
                    block,
                    pid,
                    expected,
                    actual: run.len() as i32,
                });
            }
            for (i, (_, nid)) in run.iter().enumerate() {
                if *nid != i as i32 {
                    return Err(ProtocolError::NonSequentialNeuron { block, pid });
                }
            }
        }
        begin = end;
    }
    Ok(())
}

/// Drive the ingest loop: matrix blocks feed the assembler, log blocks are
/// forwarded to the `log` facade, a clean end of stream yields the finished
/// descriptor. Any framing or protocol failure aborts the whole exchange;
/// the partially built descriptor is dropped with the assembler.
pub fn read_network<R: Read>(r: &mut R) -> Result<NetworkDescriptor, Error> {
    let mut assembler = NetworkAssembler::new();
    while let Some(block) = read_block(r)? {
        match block {
            Block::Matrix(m) => assembler.consume(m)?,
            Block::Log(msg) => forward_to_log(&msg),
        }
    }
    Ok(assembler.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::types::MatrixHeader;
    use crate::types::{Scalar, ScalarType};

    fn populations(counts: &[i32]) -> Matrix {
        let header = MatrixHeader::from_pairs(&[
            ("count", ScalarType::Int32),
            ("type", ScalarType::Int32),
        ])
        .unwrap();
        let rows: Vec<Vec<Scalar>> = counts
            .iter()
            .map(|c| vec![Scalar::Int32(*c), Scalar::Int32(0)])
            .collect();
        let rows: Vec<&[Scalar]> = rows.iter().map(|r| r.as_slice()).collect();
        Matrix::from_rows("populations", header, &rows).unwrap()
    }

    fn target(pid: i32, nid: i32) -> Matrix {
        let header = MatrixHeader::from_pairs(&[
            ("pid", ScalarType::Int32),
            ("nid", ScalarType::Int32),
        ])
        .unwrap();
        Matrix::from_rows("target", header, &[&[Scalar::Int32(pid), Scalar::Int32(nid)]])
            .unwrap()
    }

    fn spike_times(times: &[f32]) -> Matrix {
        let header =
            MatrixHeader::from_pairs(&[("times", ScalarType::Float32)]).unwrap();
        let rows: Vec<Vec<Scalar>> =
            times.iter().map(|t| vec![Scalar::Float32(*t)]).collect();
        let rows: Vec<&[Scalar]> = rows.iter().map(|r| r.as_slice()).collect();
        Matrix::from_rows("spike_times", header, &rows).unwrap()
    }

    #[test]
    fn pairing_preserves_order() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[2])).unwrap();
        asm.consume(target(0, 0)).unwrap();
        asm.consume(spike_times(&[1.0, 2.0, 3.0])).unwrap();
        asm.consume(target(0, 1)).unwrap();
        asm.consume(spike_times(&[4.0, 5.0])).unwrap();

        let net = asm.finish().unwrap();
        assert_eq!(net.spike_times.len(), 2);
        assert_eq!((net.spike_times[0].pid, net.spike_times[0].nid), (0, 0));
        assert_eq!(net.spike_times[0].times_f64(), vec![1.0, 2.0, 3.0]);
        assert_eq!((net.spike_times[1].pid, net.spike_times[1].nid), (0, 1));
        assert_eq!(net.spike_times[1].times_f64(), vec![4.0, 5.0]);
    }

    #[test]
    fn duplicate_populations_is_rejected() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[2])).unwrap();
        let err = asm.consume(populations(&[2])).unwrap_err();
        assert_eq!(err, ProtocolError::DuplicateBlock { name: "populations" });
    }

    #[test]
    fn dangling_spike_times_is_rejected() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[1])).unwrap();
        let err = asm.consume(spike_times(&[1.0])).unwrap_err();
        assert_eq!(err, ProtocolError::TargetNotSet);
        assert_eq!(err.to_string(), "target neuron was not set");
    }

    #[test]
    fn target_consumed_once() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[1])).unwrap();
        asm.consume(target(0, 0)).unwrap();
        asm.consume(spike_times(&[1.0])).unwrap();
        // The pairing was cleared; a second spike_times has no target.
        let err = asm.consume(spike_times(&[2.0])).unwrap_err();
        assert_eq!(err, ProtocolError::TargetNotSet);
    }

    #[test]
    fn non_singleton_target_is_rejected() {
        let header = MatrixHeader::from_pairs(&[
            ("pid", ScalarType::Int32),
            ("nid", ScalarType::Int32),
        ])
        .unwrap();
        let m = Matrix::from_rows(
            "target",
            header,
            &[
                &[Scalar::Int32(0), Scalar::Int32(0)],
                &[Scalar::Int32(0), Scalar::Int32(1)],
            ],
        )
        .unwrap();

        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[2])).unwrap();
        let err = asm.consume(m).unwrap_err();
        assert_eq!(err, ProtocolError::TargetNotSingleton { rows: 2 });
    }

    #[test]
    fn unsupported_name_is_rejected() {
        let header = MatrixHeader::from_pairs(&[("x", ScalarType::Int32)]).unwrap();
        let m = Matrix::from_rows("voltages", header, &[&[Scalar::Int32(1)]]).unwrap();
        let err = NetworkAssembler::new().consume(m).unwrap_err();
        assert_eq!(err, ProtocolError::UnsupportedBlock { name: "voltages".into() });
    }

    #[test]
    fn missing_mandatory_field_is_rejected() {
        let header = MatrixHeader::from_pairs(&[("count", ScalarType::Int32)]).unwrap();
        let m = Matrix::from_rows("populations", header, &[&[Scalar::Int32(3)]]).unwrap();
        let err = NetworkAssembler::new().consume(m).unwrap_err();
        assert_eq!(err, ProtocolError::MissingField { block: "populations", field: "type" });
    }

    #[test]
    fn missing_populations_is_rejected() {
        let err = NetworkAssembler::new().finish().unwrap_err();
        assert_eq!(err, ProtocolError::MissingPopulations);
    }

    #[test]
    fn dangling_target_is_discarded() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[1])).unwrap();
        asm.consume(target(0, 0)).unwrap();
        let net = asm.finish().unwrap();
        assert!(net.spike_times.is_empty());
    }

    fn parameters(keys: &[(i32, i32)]) -> Matrix {
        let header = MatrixHeader::from_pairs(&[
            ("pid", ScalarType::Int32),
            ("nid", ScalarType::Int32),
            ("v_rest", ScalarType::Float32),
        ])
        .unwrap();
        let rows: Vec<Vec<Scalar>> = keys
            .iter()
            .map(|(p, n)| vec![Scalar::Int32(*p), Scalar::Int32(*n), Scalar::Float32(-65.0)])
            .collect();
        let rows: Vec<&[Scalar]> = rows.iter().map(|r| r.as_slice()).collect();
        Matrix::from_rows("parameters", header, &rows).unwrap()
    }

    #[test]
    fn per_neuron_parameter_run_must_cover_population() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[3])).unwrap();
        asm.consume(parameters(&[(0, 0), (0, 1)])).unwrap();
        let err = asm.finish().unwrap_err();
        assert_eq!(
            err,
            ProtocolError::RunCountMismatch {
                block: "parameters",
                pid: 0,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn all_neurons_run_must_be_singleton() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[3])).unwrap();
        asm.consume(parameters(&[(0, ALL_NEURONS), (0, ALL_NEURONS)])).unwrap();
        let err = asm.finish().unwrap_err();
        assert_eq!(
            err,
            ProtocolError::AllNeuronsNotSingleton { block: "parameters", pid: 0 }
        );
    }

    #[test]
    fn split_runs_are_rejected() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[1, 2])).unwrap();
        asm.consume(parameters(&[(0, 0), (1, 0), (1, 1), (0, 0)])).unwrap();
        let err = asm.finish().unwrap_err();
        assert_eq!(
            err,
            ProtocolError::NonContiguousRun { block: "parameters", pid: 0 }
        );
    }

    #[test]
    fn unsorted_neuron_indices_are_rejected() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[2])).unwrap();
        asm.consume(parameters(&[(0, 1), (0, 0)])).unwrap();
        let err = asm.finish().unwrap_err();
        assert_eq!(
            err,
            ProtocolError::NonSequentialNeuron { block: "parameters", pid: 0 }
        );
    }

    #[test]
    fn valid_parameter_layouts_are_accepted() {
        let mut asm = NetworkAssembler::new();
        asm.consume(populations(&[2, 3])).unwrap();
        asm.consume(parameters(&[(0, 0), (0, 1), (1, ALL_NEURONS)])).unwrap();
        let net = asm.finish().unwrap();
        assert_eq!(net.parameters.len(), 1);
        assert_eq!(net.population_size(1), Some(3));
    }
}
