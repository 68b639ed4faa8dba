use std::io::Read;

use crate::diag::types::{LogMessage, Severity};
use crate::framing::decode::{read_f64, read_i32, read_str};
use crate::framing::types::FrameError;

/// Decode one log payload. Unknown severity codes are mapped onto the
/// ordered threshold set rather than rejected.
pub fn decode_log<R: Read>(r: &mut R) -> Result<LogMessage, FrameError> {
    let time = read_f64(r)?;
    let severity = Severity::from_threshold(read_i32(r)?);
    let module = read_str(r)?;
    let message = read_str(r)?;
    Ok(LogMessage { time, severity, module, message })
}
