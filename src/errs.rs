//! Error types for the frequent sequential pattern miner.

use thiserror::Error;

pub type MinerResult<T> = Result<T, MinerError>;

/// The miner's total error surface. `PatternNotFound` is used internally as
/// a control signal by `increment_if_present` and never escapes the public
/// mining surface; it is kept public only so that `Trie::lookup` can be used
/// directly by advanced callers.
#[derive(Debug, Error)]
pub enum MinerError {
    #[error("pattern not found in trie")]
    PatternNotFound,

    #[error(
        "queue would hold {required} records, exceeding the budget of \
         {allowed} records"
    )]
    ExceedAllocatedMemory { required: u64, allowed: u64 },

    #[error("root finder failed to converge for lambda={lambda}, conf={conf}")]
    RootFailure { lambda: f64, conf: f64 },

    #[error("byte {0:?} is not a valid DNA symbol")]
    InvalidSymbol(char),
}
