use crate::diag::types::LogMessage;

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_str(out: &mut Vec<u8>, s: &str) {
    put_u32(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

/// Encode a log record into canonical payload bytes (without the frame
/// envelope or block type tag).
///
/// Layout:
///
/// ```text
/// [ timestamp (8, f64) ]
/// [ severity  (4, i32) ]
/// [ module_len (4) ][ module ]
/// [ msg_len    (4) ][ msg ]
/// ```
pub fn encode_log(msg: &LogMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + 8 + msg.module.len() + msg.message.len());
    out.extend_from_slice(&msg.time.to_le_bytes());
    out.extend_from_slice(&msg.severity.code().to_le_bytes());
    put_str(&mut out, &msg.module);
    put_str(&mut out, &msg.message);
    out
}
