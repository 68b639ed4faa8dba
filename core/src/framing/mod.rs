//! Wire framing.
//!
//! Responsibilities:
//! - Primitive little-endian scalar and string codecs over `Read`/`Write`
//! - Block start/end markers and the declared-length envelope
//! - Byte-by-byte stream resynchronization at block boundaries
//!
//! Non-responsibilities:
//! - Payload interpretation (matrix / log codecs)
//! - Block dispatch (demultiplexer)
//! - Network semantics

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{FrameError, Resync};
pub use encode::{write_f64, write_i32, write_str, write_u32, write_frame};
pub use decode::{read_f64, read_i32, read_str, read_u32, synchronise};
