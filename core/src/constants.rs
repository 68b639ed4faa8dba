/// Marker written in front of every block.
// Protocol magic fields are `u32` here rather than `[u8; 4]` because the
// resynchronization scan compares a rolling little-endian 32-bit window.
pub const BLOCK_START_SEQUENCE: u32 = 0x665a_8cda;

/// Marker closing every block; distinct from the start marker.
pub const BLOCK_END_SEQUENCE: u32 = 0x4200_62cb;

/// Sentinel neuron index meaning "every neuron of the referenced population".
pub const ALL_NEURONS: i32 = 0x7fff_ffff;

/// Block type identifiers (mirrored in the frame demultiplexer).
pub mod block_ids {
    pub const MATRIX: u32 = 0x01;
    pub const LOG: u32 = 0x02;
}

/// Severity codes carried by log blocks. Larger is more severe; the gaps
/// leave room for the intermediate levels of external logging facilities.
pub mod severity_ids {
    pub const DEBUG: i32 = 10;
    pub const INFO: i32 = 20;
    pub const WARNING: i32 = 30;
    pub const ERROR: i32 = 40;
    pub const FATAL: i32 = 50;
}

/// Reserved block names understood by the network assembler and the
/// result encoder.
pub mod block_names {
    pub const POPULATIONS: &str = "populations";
    pub const PARAMETERS: &str = "parameters";
    pub const SIGNALS: &str = "signals";
    pub const TARGET: &str = "target";
    pub const SPIKE_TIMES: &str = "spike_times";
    pub const LIST_CONNECTION_HEADER: &str = "list_connection_header";
    pub const LIST_CONNECTION: &str = "list_connection";
    pub const GROUP_CONNECTIONS: &str = "group_connections";
    pub const RUNTIMES: &str = "runtimes";
    pub const TRACE_PREFIX: &str = "trace_";
}
