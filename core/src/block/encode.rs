use std::io::Write;

use crate::block::Block;
use crate::constants::block_ids;
use crate::diag::encode::encode_log;
use crate::diag::types::LogMessage;
use crate::error::Error;
use crate::framing::encode::write_frame;
use crate::matrix::encode::encode_matrix;
use crate::matrix::types::Matrix;

fn frame_payload<W: Write>(w: &mut W, block_id: u32, payload: &[u8]) -> Result<(), Error> {
    let mut framed = Vec::with_capacity(4 + payload.len());
    framed.extend_from_slice(&block_id.to_le_bytes());
    framed.extend_from_slice(payload);
    write_frame(w, &framed)?;
    Ok(())
}

/// Serialize one matrix block, envelope included.
pub fn write_matrix<W: Write>(w: &mut W, m: &Matrix) -> Result<(), Error> {
    let payload = encode_matrix(m)?;
    frame_payload(w, block_ids::MATRIX, &payload)
}

/// Serialize one log block, envelope included.
pub fn write_log<W: Write>(w: &mut W, msg: &LogMessage) -> Result<(), Error> {
    frame_payload(w, block_ids::LOG, &encode_log(msg))
}

/// Serialize one block of either kind.
pub fn write_block<W: Write>(w: &mut W, block: &Block) -> Result<(), Error> {
    match block {
        Block::Matrix(m) => write_matrix(w, m),
        Block::Log(msg) => write_log(w, msg),
    }
}
