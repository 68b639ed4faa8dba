use std::io::Write;

use crate::block::encode::write_matrix;
use crate::constants::block_names;
use crate::error::Error;
use crate::matrix::types::{Matrix, MatrixError, MatrixHeader};
use crate::network::types::NetworkDescriptor;
use crate::types::{Scalar, ScalarType};

/// One-row `target` block addressing a single neuron.
pub(crate) fn target_matrix(pid: i32, nid: i32) -> Result<Matrix, MatrixError> {
    let header = MatrixHeader::from_pairs(&[
        ("pid", ScalarType::Int32),
        ("nid", ScalarType::Int32),
    ])?;
    Matrix::from_rows(
        block_names::TARGET,
        header,
        &[&[Scalar::Int32(pid), Scalar::Int32(nid)]],
    )
}

/// Serialize a descriptor back onto the wire.
///
/// Block order follows the original marshalling direction: populations
/// first, then connectivity, then recording flags and parameters, then the
/// spike time arrays with their one-row `target` blocks re-emitted in front
/// of each payload. The resulting stream reassembles into an equal
/// descriptor.
pub fn write_network<W: Write>(w: &mut W, net: &NetworkDescriptor) -> Result<(), Error> {
    write_matrix(w, &net.populations)?;

    for m in &net.list_connections {
        write_matrix(w, m)?;
    }
    if let Some(m) = &net.list_connection_header {
        write_matrix(w, m)?;
    }
    if let Some(m) = &net.group_connections {
        write_matrix(w, m)?;
    }

    for m in &net.signals {
        write_matrix(w, m)?;
    }
    for m in &net.parameters {
        write_matrix(w, m)?;
    }

    for st in &net.spike_times {
        write_matrix(w, &target_matrix(st.pid, st.nid)?)?;
        write_matrix(w, &st.times)?;
    }

    Ok(())
}
