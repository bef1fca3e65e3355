//! Error types for reading transaction databases and running the miner
//! (spec §7).

use thiserror::Error;

/// Everything that can go wrong between reading input and reporting
/// mined patterns.
#[derive(Debug, Error)]
pub enum MiningError {
    /// A transaction block didn't parse: a malformed line, a dangling
    /// edge endpoint, a duplicate vertex id, or similar structural
    /// defect (spec §7).
    #[error("malformed input at line {line}: {detail}")]
    MalformedInput { line: usize, detail: String },

    /// A vertex carried no label under a policy that requires one
    /// (spec §4.H, §7).
    #[error("vertex {vertex} in transaction {transaction} has no label")]
    UnlabeledVertex { transaction: String, vertex: usize },

    /// `minsup` was zero; the engine requires a positive threshold
    /// (spec §6). `minsup` exceeding the transaction count is *not* an
    /// error — it is a valid boundary that simply emits nothing
    /// (spec §8).
    #[error("invalid minimum support {minsup} for {transaction_count} transactions")]
    InvalidSupportThreshold {
        minsup: usize,
        transaction_count: usize,
    },

    /// An internal bookkeeping invariant was violated — this indicates a
    /// bug in the miner, not bad input (spec §7).
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Propagated I/O failure while reading a transaction file or
    /// writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MiningError>;
