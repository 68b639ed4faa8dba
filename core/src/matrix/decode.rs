use std::io::Read;

use crate::error::Error;
use crate::framing::decode::{read_str, read_u32};
use crate::matrix::types::{Column, Matrix, MatrixError, MatrixHeader};
use crate::types::ScalarType;

/// Decode one matrix payload.
///
/// Reads the name, the column list, the row count, then exactly
/// `rows × stride` bytes, where the stride is computed from the just-read
/// header. The caller (block demultiplexer) reconciles the total consumed
/// length against the frame's declared block length.
pub fn decode_matrix<R: Read>(r: &mut R) -> Result<Matrix, Error> {
    let name = read_str(r)?;

    let n_columns = read_u32(r)? as usize;
    let mut columns = Vec::with_capacity(n_columns);
    for _ in 0..n_columns {
        let col_name = read_str(r)?;
        let raw = read_u32(r)?;
        let ty = ScalarType::try_from(raw)
            .map_err(|_| MatrixError::UnknownScalarType { raw })?;
        columns.push(Column::new(col_name, ty));
    }
    let header = MatrixHeader::new(columns)?;

    let rows = read_u32(r)? as usize;
    let mut data = vec![0u8; rows * header.stride()];
    r.read_exact(&mut data)
        .map_err(crate::framing::types::FrameError::from)?;

    Ok(Matrix::from_raw(name, header, rows, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::encode::encode_matrix;
    use crate::types::Scalar;

    fn sample() -> Matrix {
        let header = MatrixHeader::from_pairs(&[
            ("count", ScalarType::Int32),
            ("type", ScalarType::Int32),
        ])
        .unwrap();
        Matrix::from_rows(
            "populations",
            header,
            &[
                &[Scalar::Int32(5), Scalar::Int32(0)],
                &[Scalar::Int32(3), Scalar::Int32(1)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn encode_decode_roundtrip() {
        let m = sample();
        let payload = encode_matrix(&m).unwrap();
        let mut slice = payload.as_slice();
        let back = decode_matrix(&mut slice).unwrap();
        assert!(slice.is_empty());
        assert_eq!(back, m);
    }

    #[test]
    fn unknown_type_code_is_rejected() {
        let m = sample();
        let mut payload = encode_matrix(&m).unwrap();
        // Corrupt the type code of the first column:
        // name(4+11) + n_columns(4) + colname(4+5) = 28..32
        payload[28..32].copy_from_slice(&99u32.to_le_bytes());
        let err = decode_matrix(&mut payload.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            Error::Matrix(MatrixError::UnknownScalarType { raw: 99 })
        ));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = MatrixHeader::from_pairs(&[
            ("pid", ScalarType::Int32),
            ("pid", ScalarType::Int32),
        ])
        .unwrap_err();
        assert!(matches!(err, MatrixError::DuplicateColumn { .. }));
    }

    #[test]
    fn cell_access_decodes_offsets() {
        let m = sample();
        assert_eq!(m.get_i32(0, 0), 5);
        assert_eq!(m.get_i32(1, 1), 1);
        assert_eq!(m.header().offset(1), 4);
        assert_eq!(m.header().stride(), 8);
    }

    #[test]
    fn mixed_width_layout_has_no_padding() {
        let header = MatrixHeader::from_pairs(&[
            ("a", ScalarType::Int8),
            ("b", ScalarType::Float64),
            ("c", ScalarType::UInt16),
        ])
        .unwrap();
        assert_eq!(header.stride(), 11);
        assert_eq!(header.offset(1), 1);
        assert_eq!(header.offset(2), 9);

        let m = Matrix::from_rows(
            "mixed",
            header,
            &[&[Scalar::Int8(-1), Scalar::Float64(0.25), Scalar::UInt16(777)]],
        )
        .unwrap();
        assert_eq!(m.get(0, 1), Scalar::Float64(0.25));
        assert_eq!(m.get(0, 2), Scalar::UInt16(777));
    }

    #[test]
    fn row_arity_mismatch_fails_fast() {
        let header =
            MatrixHeader::from_pairs(&[("times", ScalarType::Float32)]).unwrap();
        let err = Matrix::from_rows(
            "spike_times",
            header,
            &[&[Scalar::Float32(1.0), Scalar::Float32(2.0)]],
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::ColumnCountMismatch { header: 1, data: 2 }));
    }
}
