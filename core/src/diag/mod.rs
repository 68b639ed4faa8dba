//! Structured diagnostics multiplexed into the block stream.
//!
//! A log block carries a timestamp, a severity code, a module name and a
//! free-text message. It shares the stream with matrix blocks and is told
//! apart purely by the frame's block type tag, so one pipe transports both
//! data and diagnostics without a second channel.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{LogMessage, Severity};
pub use encode::encode_log;
pub use decode::decode_log;

/// Re-emit a decoded diagnostic through the `log` facade.
///
/// The ingest loop forwards log blocks from the peer this way, so a consumer
/// observes remote diagnostics with its usual logger configuration.
pub fn forward_to_log(msg: &types::LogMessage) {
    log::logger().log(
        &log::Record::builder()
            .args(format_args!("{}", msg.message))
            .level(msg.severity.to_level())
            .target(&msg.module)
            .build(),
    );
}
