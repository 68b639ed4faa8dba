use std::io::Read;

use crate::block::Block;
use crate::constants::{block_ids, BLOCK_END_SEQUENCE, BLOCK_START_SEQUENCE};
use crate::diag::decode::decode_log;
use crate::error::Error;
use crate::framing::decode::{read_u32, synchronise};
use crate::framing::types::{FrameError, Resync};
use crate::matrix::decode::decode_matrix;

/// Read the next block off the stream.
///
/// Scans for the start marker (skipping any stray bytes in between),
/// materializes the declared number of payload bytes, verifies the end
/// marker, then dispatches to the payload codec by block type tag. The
/// codec must consume the payload exactly; any slack is a desynchronization
/// and fatal.
///
/// Returns `Ok(None)` on a clean end of stream.
pub fn read_block<R: Read>(r: &mut R) -> Result<Option<Block>, Error> {
    match synchronise(r, BLOCK_START_SEQUENCE)? {
        Resync::EndOfStream => return Ok(None),
        Resync::Found { .. } => {}
    }

    let declared = read_u32(r)?;
    let mut payload = vec![0u8; declared as usize];
    r.read_exact(&mut payload).map_err(FrameError::from)?;

    let end = read_u32(r)?;
    if end != BLOCK_END_SEQUENCE {
        return Err(FrameError::MissingEndMarker { found: end }.into());
    }

    let mut slice = payload.as_slice();
    let raw = read_u32(&mut slice)?;
    let block = match raw {
        block_ids::MATRIX => Block::Matrix(decode_matrix(&mut slice)?),
        block_ids::LOG => Block::Log(decode_log(&mut slice)?),
        _ => return Err(FrameError::UnknownBlockType { raw }.into()),
    };

    if !slice.is_empty() {
        let actual = declared - slice.len() as u32;
        return Err(FrameError::LengthMismatch { declared, actual }.into());
    }

    Ok(Some(block))
}
