//! Host-facing error types.
//!
//! These are distinct from the first-class `Error` IR slots in [`crate::slot`]: a slot of
//! type `Error` is a value the *evaluated program* produces and can itself inspect. The
//! types here are for conditions the *host embedding this crate* needs to react to —
//! things the evaluated program never sees.

use crate::address::GlobalAddress;

/// Failures from [`crate::global_store::GlobalStore`] operations.
#[derive(thiserror::Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum GlobalStoreError {
    /// `evaluate`/`call` was asked for a callee address beyond the block vector.
    #[error("global address {0:?} has no registered block")]
    UnknownBlock(GlobalAddress),
}

/// Failures from [`crate::evaluator::evaluate`].
#[derive(thiserror::Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum EvaluatorError {
    /// The evaluator recursed past the configured [`crate::limits::EvaluatorLimits`]
    /// call-depth cap.
    #[error("call depth exceeded configured limit of {limit}")]
    CallDepthExceeded { limit: u32 },
    /// Propagated from the callee lookup.
    #[error(transparent)]
    UnknownBlock(#[from] GlobalStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_block_error_formats_the_address() {
        let err = GlobalStoreError::UnknownBlock(GlobalAddress(4));
        assert_eq!(err.to_string(), "global address G4 has no registered block");
    }

    #[test]
    fn evaluator_error_wraps_global_store_error() {
        let err: EvaluatorError = GlobalStoreError::UnknownBlock(GlobalAddress(1)).into();
        assert!(matches!(err, EvaluatorError::UnknownBlock(_)));
    }
}
