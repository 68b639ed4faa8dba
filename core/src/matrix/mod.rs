//! Column-typed record arrays ("matrix blocks").
//!
//! Responsibilities:
//! - Header model: ordered, uniquely named, typed columns
//! - Row-major raw record storage with cumulative byte offsets
//! - Canonical payload encode/decode with strict validation
//!
//! Non-responsibilities:
//! - Framing and markers
//! - Block-name semantics (network assembler)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Column, Matrix, MatrixError, MatrixHeader};
pub use encode::encode_matrix;
pub use decode::decode_matrix;
