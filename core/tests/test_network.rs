// Network descriptor assembly over the wire, including the end-to-end
// loopback: network blocks out, descriptor in, runtimes back.

use anyhow::Result;

use binnf_core::block::{read_block, write_matrix, Block};
use binnf_core::constants::ALL_NEURONS;
use binnf_core::error::Error;
use binnf_core::matrix::{Matrix, MatrixHeader};
use binnf_core::network::{read_network, write_network, ProtocolError};
use binnf_core::results::{write_runtimes, RunTimings};
use binnf_core::types::{Scalar, ScalarType};

fn populations(rows: &[(i32, i32)]) -> Matrix {
    let header = MatrixHeader::from_pairs(&[
        ("count", ScalarType::Int32),
        ("type", ScalarType::Int32),
    ])
    .unwrap();
    let cells: Vec<Vec<Scalar>> = rows
        .iter()
        .map(|(count, ty)| vec![Scalar::Int32(*count), Scalar::Int32(*ty)])
        .collect();
    let refs: Vec<&[Scalar]> = cells.iter().map(|r| r.as_slice()).collect();
    Matrix::from_rows("populations", header, &refs).unwrap()
}

fn all_to_all_group_connection(weight: f32, delay: f32) -> Matrix {
    let header = MatrixHeader::from_pairs(&[
        ("pid_src", ScalarType::Int32),
        ("nid_src_start", ScalarType::Int32),
        ("nid_src_end", ScalarType::Int32),
        ("pid_tar", ScalarType::Int32),
        ("nid_tar_start", ScalarType::Int32),
        ("nid_tar_end", ScalarType::Int32),
        ("connector_id", ScalarType::Int32),
        ("weight", ScalarType::Float32),
        ("delay", ScalarType::Float32),
        ("parameter", ScalarType::Float32),
    ])
    .unwrap();
    Matrix::from_rows(
        "group_connections",
        header,
        &[&[
            Scalar::Int32(0),
            Scalar::Int32(0),
            Scalar::Int32(5),
            Scalar::Int32(0),
            Scalar::Int32(0),
            Scalar::Int32(5),
            Scalar::Int32(1), // all-to-all connector
            Scalar::Float32(weight),
            Scalar::Float32(delay),
            Scalar::Float32(0.0),
        ]],
    )
    .unwrap()
}

#[test]
fn end_to_end_loopback() -> Result<()> {
    // Network direction: populations + one all-to-all connector group.
    let mut wire = Vec::new();
    write_matrix(&mut wire, &populations(&[(5, 0)]))?;
    write_matrix(&mut wire, &all_to_all_group_connection(0.5, 1.0))?;

    let net = read_network(&mut wire.as_slice())?;
    assert_eq!(net.population_count(), 1);
    assert_eq!(net.population_size(0), Some(5));
    assert_eq!(net.population_type(0), Some(0));

    let group = net.group_connections.as_ref().expect("connector group");
    assert_eq!(group.rows(), 1);
    let w = group.header().column_index("weight").unwrap();
    let d = group.header().column_index("delay").unwrap();
    assert_eq!(group.get_f64(0, w), 0.5);
    assert_eq!(group.get_f64(0, d), 1.0);

    // Result direction: the run timing breakdown, preserved exactly.
    let timings = RunTimings {
        total: 0.1 + 0.2, // not representable exactly in f32
        sim: 1.0 / 3.0,
        initialize: 2e-9,
        finalize: 1234.5678,
    };
    let mut back = Vec::new();
    write_runtimes(&mut back, &timings)?;

    let block = read_block(&mut back.as_slice())?.expect("runtimes block");
    let m = match block {
        Block::Matrix(m) => m,
        Block::Log(_) => panic!("expected a matrix block"),
    };
    assert_eq!(m.name(), "runtimes");
    let decoded = RunTimings::from_matrix(&m)?;
    assert_eq!(decoded, timings);
    Ok(())
}

#[test]
fn descriptor_roundtrips_through_the_wire() -> Result<()> {
    let mut wire = Vec::new();
    write_matrix(&mut wire, &populations(&[(2, 0), (3, 1)]))?;

    // Per-neuron parameters for population 0, one shared row for 1.
    let header = MatrixHeader::from_pairs(&[
        ("pid", ScalarType::Int32),
        ("nid", ScalarType::Int32),
        ("v_thresh", ScalarType::Float32),
    ])?;
    let params = Matrix::from_rows(
        "parameters",
        header,
        &[
            &[Scalar::Int32(0), Scalar::Int32(0), Scalar::Float32(-55.0)],
            &[Scalar::Int32(0), Scalar::Int32(1), Scalar::Float32(-54.0)],
            &[Scalar::Int32(1), Scalar::Int32(ALL_NEURONS), Scalar::Float32(-50.0)],
        ],
    )?;
    write_matrix(&mut wire, &params)?;

    let header = MatrixHeader::from_pairs(&[
        ("nid_src", ScalarType::Int32),
        ("nid_tar", ScalarType::Int32),
        ("weight", ScalarType::Float32),
        ("delay", ScalarType::Float32),
    ])?;
    let edges = Matrix::from_rows(
        "list_connection",
        header,
        &[
            &[Scalar::Int32(0), Scalar::Int32(1), Scalar::Float32(0.1), Scalar::Float32(1.0)],
            &[Scalar::Int32(1), Scalar::Int32(2), Scalar::Float32(0.2), Scalar::Float32(1.0)],
        ],
    )?;
    write_matrix(&mut wire, &edges)?;

    let header = MatrixHeader::from_pairs(&[
        ("pid_src", ScalarType::Int32),
        ("pid_tar", ScalarType::Int32),
        ("inh", ScalarType::Int32),
        ("file", ScalarType::Int32),
    ])?;
    let edge_header = Matrix::from_rows(
        "list_connection_header",
        header,
        &[&[Scalar::Int32(0), Scalar::Int32(1), Scalar::Int32(0), Scalar::Int32(0)]],
    )?;
    write_matrix(&mut wire, &edge_header)?;

    let header = MatrixHeader::from_pairs(&[("record_spikes", ScalarType::Int32)])?;
    let signals = Matrix::from_rows("signals", header, &[&[Scalar::Int32(1)]])?;
    write_matrix(&mut wire, &signals)?;

    // Spike source input for both neurons of population 0.
    let target_header = MatrixHeader::from_pairs(&[
        ("pid", ScalarType::Int32),
        ("nid", ScalarType::Int32),
    ])?;
    let times_header = MatrixHeader::from_pairs(&[("times", ScalarType::Float32)])?;
    for (nid, times) in [(0, vec![1.0f32, 2.0]), (1, vec![4.0f32])] {
        let target = Matrix::from_rows(
            "target",
            target_header.clone(),
            &[&[Scalar::Int32(0), Scalar::Int32(nid)]],
        )?;
        write_matrix(&mut wire, &target)?;
        let cells: Vec<Vec<Scalar>> =
            times.iter().map(|t| vec![Scalar::Float32(*t)]).collect();
        let refs: Vec<&[Scalar]> = cells.iter().map(|r| r.as_slice()).collect();
        write_matrix(&mut wire, &Matrix::from_rows("spike_times", times_header.clone(), &refs)?)?;
    }

    let net = read_network(&mut wire.as_slice())?;
    assert_eq!(net.parameters.len(), 1);
    assert_eq!(net.list_connections.len(), 1);
    assert!(net.list_connection_header.is_some());
    assert_eq!(net.signals.len(), 1);
    assert_eq!(net.spike_times.len(), 2);

    // Serialize the descriptor back and reassemble: must be identical.
    let mut second = Vec::new();
    write_network(&mut second, &net)?;
    let net2 = read_network(&mut second.as_slice())?;
    assert_eq!(net2, net);
    Ok(())
}

#[test]
fn duplicate_populations_over_the_wire() {
    let mut wire = Vec::new();
    write_matrix(&mut wire, &populations(&[(5, 0)])).unwrap();
    write_matrix(&mut wire, &populations(&[(5, 0)])).unwrap();

    let err = read_network(&mut wire.as_slice()).unwrap_err();
    assert!(matches!(
        err,
        Error::Protocol(ProtocolError::DuplicateBlock { name: "populations" })
    ));
}

#[test]
fn log_blocks_are_transparent_to_assembly() {
    use binnf_core::block::write_log;
    use binnf_core::diag::{LogMessage, Severity};

    let mut wire = Vec::new();
    write_log(
        &mut wire,
        &LogMessage::new(1.0, Severity::Debug, "backend", "loading"),
    )
    .unwrap();
    write_matrix(&mut wire, &populations(&[(4, 2)])).unwrap();
    write_log(
        &mut wire,
        &LogMessage::new(2.0, Severity::Warning, "backend", "slow filesystem"),
    )
    .unwrap();

    let net = read_network(&mut wire.as_slice()).unwrap();
    assert_eq!(net.population_size(0), Some(4));
}
