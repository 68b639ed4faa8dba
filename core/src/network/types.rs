use std::fmt;

use crate::matrix::types::Matrix;

/// Spike times destined for one neuron, paired from a preceding `target`
/// block.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeTimes {
    pub pid: i32,
    pub nid: i32,
    /// The `spike_times` matrix as received (one `times` column).
    pub times: Matrix,
}

impl SpikeTimes {
    /// Spike times as plain floats, in row order.
    pub fn times_f64(&self) -> Vec<f64> {
        let col = self.times.header().column_index("times").unwrap_or(0);
        (0..self.times.rows()).map(|r| self.times.get_f64(r, col)).collect()
    }
}

/// One fully assembled network description.
///
/// Built in a single forward pass over the block stream and handed to the
/// execution stage complete and immutable; the assembler keeps no state
/// besides what is embedded here.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDescriptor {
    /// One row per population, mandatory columns `count` and `type`, plus
    /// optional per-signal recording flags.
    pub populations: Matrix,
    /// Parameter override matrices, keyed by `(pid, nid)` per row.
    pub parameters: Vec<Matrix>,
    /// Per-neuron spike time arrays in arrival order.
    pub spike_times: Vec<SpikeTimes>,
    /// Explicit edge lists.
    pub list_connections: Vec<Matrix>,
    /// Bookkeeping for the edge lists (at most one).
    pub list_connection_header: Option<Matrix>,
    /// Parametrized connector descriptors (at most one).
    pub group_connections: Option<Matrix>,
    /// Per-population recording-flag matrices.
    pub signals: Vec<Matrix>,
}

impl NetworkDescriptor {
    pub fn population_count(&self) -> usize {
        self.populations.rows()
    }

    /// Neuron count of the given population.
    pub fn population_size(&self, pid: usize) -> Option<i32> {
        let col = self.populations.header().column_index("count")?;
        (pid < self.populations.rows()).then(|| self.populations.get_i32(pid, col))
    }

    /// Neuron type table index of the given population.
    pub fn population_type(&self, pid: usize) -> Option<i32> {
        let col = self.populations.header().column_index("type")?;
        (pid < self.populations.rows()).then(|| self.populations.get_i32(pid, col))
    }

    /// Neuron counts of all populations, in population order.
    pub(crate) fn population_sizes(&self) -> Vec<i32> {
        (0..self.population_count())
            .map(|pid| self.population_size(pid).unwrap_or(0))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A matrix block with a name outside the fixed taxonomy.
    UnsupportedBlock { name: String },

    /// A mandatory column is absent.
    MissingField { block: &'static str, field: &'static str },

    /// A singleton block occurred twice in one stream.
    DuplicateBlock { name: &'static str },

    /// `spike_times` (or a trace block) arrived with no unconsumed target.
    TargetNotSet,

    /// A `target` block must carry exactly one row.
    TargetNotSingleton { rows: usize },

    /// The stream ended without a `populations` block.
    MissingPopulations,

    /// A block referenced a population outside the descriptor.
    InvalidPopulation { pid: i32 },

    /// A target referenced a neuron outside its population.
    InvalidTarget { pid: i32, nid: i32 },

    /// Rows for one population were split across non-adjacent runs.
    NonContiguousRun { block: &'static str, pid: i32 },

    /// A per-neuron run does not cover the population exactly.
    RunCountMismatch { block: &'static str, pid: i32, expected: i32, actual: i32 },

    /// An ALL_NEURONS row must be the only row for its population.
    AllNeuronsNotSingleton { block: &'static str, pid: i32 },

    /// Neuron indices within a run must start at zero and increase.
    NonSequentialNeuron { block: &'static str, pid: i32 },

    /// A block had the wrong number of rows.
    BadRowCount { block: &'static str, expected: usize, actual: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ProtocolError::*;
        match self {
            UnsupportedBlock { name } =>
                write!(f, "unsupported matrix type \"{}\"", name),
            MissingField { block, field } =>
                write!(f, "expected mandatory field \"{}\" in \"{}\" block", field, block),
            DuplicateBlock { name } =>
                write!(f, "only a single \"{}\" instance is supported", name),
            TargetNotSet =>
                write!(f, "target neuron was not set"),
            TargetNotSingleton { rows } =>
                write!(f, "target matrix must have exactly one element, got {} rows", rows),
            MissingPopulations =>
                write!(f, "stream ended without a \"populations\" block"),
            InvalidPopulation { pid } =>
                write!(f, "population index {} out of range", pid),
            InvalidTarget { pid, nid } =>
                write!(f, "invalid target neuron ({}, {})", pid, nid),
            NonContiguousRun { block, pid } =>
                write!(f, "rows for population {} in \"{}\" must be contiguous", pid, block),
            RunCountMismatch { block, pid, expected, actual } =>
                write!(f,
                    "\"{}\" rows for population {} must cover all {} neurons, got {}",
                    block, pid, expected, actual),
            AllNeuronsNotSingleton { block, pid } =>
                write!(f,
                    "\"{}\" ALL_NEURONS row for population {} must be the only row",
                    block, pid),
            NonSequentialNeuron { block, pid } =>
                write!(f,
                    "\"{}\" neuron indices for population {} must start at zero and be sorted",
                    block, pid),
            BadRowCount { block, expected, actual } =>
                write!(f, "\"{}\" block must have {} rows, got {}", block, expected, actual),
        }
    }
}

impl std::error::Error for ProtocolError {}
