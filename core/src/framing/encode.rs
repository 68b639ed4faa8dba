use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::constants::{BLOCK_END_SEQUENCE, BLOCK_START_SEQUENCE};
use crate::framing::types::FrameError;

/// Write one little-endian i32.
pub fn write_i32<W: Write>(w: &mut W, v: i32) -> Result<(), FrameError> {
    w.write_i32::<LittleEndian>(v)?;
    Ok(())
}

/// Write one little-endian u32.
pub fn write_u32<W: Write>(w: &mut W, v: u32) -> Result<(), FrameError> {
    w.write_u32::<LittleEndian>(v)?;
    Ok(())
}

/// Write one little-endian IEEE-754 double.
pub fn write_f64<W: Write>(w: &mut W, v: f64) -> Result<(), FrameError> {
    w.write_f64::<LittleEndian>(v)?;
    Ok(())
}

/// Write a length-prefixed string: `[u32 len][bytes]`, no terminator.
pub fn write_str<W: Write>(w: &mut W, s: &str) -> Result<(), FrameError> {
    write_u32(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Frame a fully assembled payload:
///
/// ```text
/// [ start marker (4) ]
/// [ block length (4) ]   bytes between here and the end marker
/// [ payload      (N) ]   block type tag + codec payload
/// [ end marker   (4) ]
/// ```
///
/// The payload is buffered by the caller before this is invoked, so a
/// failed payload encode never leaves a partial frame on the stream.
pub fn write_frame<W: Write>(w: &mut W, payload: &[u8]) -> Result<(), FrameError> {
    write_u32(w, BLOCK_START_SEQUENCE)?;
    write_u32(w, payload.len() as u32)?;
    w.write_all(payload)?;
    write_u32(w, BLOCK_END_SEQUENCE)?;
    Ok(())
}
