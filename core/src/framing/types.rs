use std::fmt;

/// Outcome of a resynchronization scan.
///
/// The scan only ever stops at a start marker or at the end of the stream.
/// Running into the end of the stream while scanning is a clean termination
/// regardless of how many stray bytes were consumed first: recovery is only
/// possible at block boundaries, so bytes in front of the final EOF that do
/// not form a marker cannot belong to a decodable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    /// A start marker was found; `skipped` counts stray bytes consumed
    /// before the marker completed.
    Found { skipped: u64 },
    /// The stream ended without a further start marker.
    EndOfStream,
}

#[derive(Debug)]
pub enum FrameError {
    /// The stream ended in the middle of a block.
    UnexpectedEof,

    /// Declared block length does not match the bytes the payload codec
    /// actually consumed.
    LengthMismatch { declared: u32, actual: u32 },

    /// The block did not close with the end marker.
    MissingEndMarker { found: u32 },

    /// Unknown block type tag in the frame envelope.
    UnknownBlockType { raw: u32 },

    /// A length-prefixed string was not valid UTF-8.
    InvalidUtf8,

    /// Underlying transport failure.
    Io(std::io::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            UnexpectedEof =>
                write!(f, "unexpected end of stream"),
            LengthMismatch { declared, actual } =>
                write!(f, "invalid block length: declared {}, consumed {}", declared, actual),
            MissingEndMarker { found } =>
                write!(f, "expected block end marker, got 0x{:08x}", found),
            UnknownBlockType { raw } =>
                write!(f, "unknown block type: 0x{:02x}", raw),
            InvalidUtf8 =>
                write!(f, "string is not valid UTF-8"),
            Io(e) =>
                write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for FrameError {}

/// Allow `?` on std::io::Error. A short read surfaces as `UnexpectedEof`,
/// everything else as a transport failure.
impl From<std::io::Error> for FrameError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            FrameError::UnexpectedEof
        } else {
            FrameError::Io(e)
        }
    }
}
