use std::io::{ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::framing::types::{FrameError, Resync};

/// Read one little-endian i32.
pub fn read_i32<R: Read>(r: &mut R) -> Result<i32, FrameError> {
    Ok(r.read_i32::<LittleEndian>()?)
}

/// Read one little-endian u32.
pub fn read_u32<R: Read>(r: &mut R) -> Result<u32, FrameError> {
    Ok(r.read_u32::<LittleEndian>()?)
}

/// Read one little-endian IEEE-754 double.
pub fn read_f64<R: Read>(r: &mut R) -> Result<f64, FrameError> {
    Ok(r.read_f64::<LittleEndian>()?)
}

/// Read a length-prefixed UTF-8 string.
pub fn read_str<R: Read>(r: &mut R) -> Result<String, FrameError> {
    let len = read_u32(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| FrameError::InvalidUtf8)
}

/// Scan for the given marker, byte by byte.
///
/// A rolling little-endian 32-bit window is compared against the marker, so
/// the scan recovers stream position after any amount of unrelated bytes.
/// Recovery is only possible at block boundaries; hitting the end of the
/// stream while scanning is a clean `EndOfStream`, never an error.
pub fn synchronise<R: Read>(r: &mut R, marker: u32) -> Result<Resync, FrameError> {
    let mut window: u32 = 0;
    let mut consumed: u64 = 0;
    loop {
        let byte = match r.read_u8() {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                if consumed > 0 {
                    log::debug!("stream ended after {} bytes without a start marker", consumed);
                }
                return Ok(Resync::EndOfStream);
            }
            Err(e) => return Err(FrameError::Io(e)),
        };
        consumed += 1;
        window = (window >> 8) | ((byte as u32) << 24);
        if window == marker {
            let skipped = consumed - 4;
            if skipped > 0 {
                log::warn!("resynchronised after skipping {} stray bytes", skipped);
            }
            return Ok(Resync::Found { skipped });
        }
    }
}
