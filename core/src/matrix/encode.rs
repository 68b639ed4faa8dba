use crate::matrix::types::{Matrix, MatrixError};

// Little-endian writers into a payload buffer. Writing into a Vec cannot
// fail, which keeps the hot path free of Result plumbing.
fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_str(out: &mut Vec<u8>, s: &str) {
    put_u32(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

/// Encode a matrix into canonical payload bytes (without the frame envelope
/// or block type tag).
///
/// Layout:
///
/// ```text
/// [ name_len (4) ][ name (N) ]
/// [ n_columns (4) ]
///   { [ colname_len (4) ][ colname ][ type_code (4) ] } × n_columns
/// [ n_rows (4) ]
/// [ row data (n_rows × stride) ]
/// ```
///
/// The row data size is reconciled against the header *before* any byte is
/// produced, so a malformed matrix never yields a partial payload.
pub fn encode_matrix(m: &Matrix) -> Result<Vec<u8>, MatrixError> {
    let expected = m.rows() * m.header().stride();
    if m.data().len() != expected {
        return Err(MatrixError::SizeMismatch { expected, actual: m.data().len() });
    }

    let mut out = Vec::with_capacity(4 + m.name().len() + 8 + expected);

    put_str(&mut out, m.name());

    put_u32(&mut out, m.header().len() as u32);
    for col in m.header().columns() {
        put_str(&mut out, &col.name);
        put_u32(&mut out, col.ty.code());
    }

    put_u32(&mut out, m.rows() as u32);
    out.extend_from_slice(m.data());

    Ok(out)
}
