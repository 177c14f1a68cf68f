//! Constructor-injected configuration.
//!
//! The reference design is explicit that "no CLI, no file formats, no environment
//! variables belong to the core" (see SPEC_FULL.md §6). This module is the one knob the
//! design does ask a host to provide: a call-depth cap, so a runaway recursive evaluation
//! fails as a recoverable [`crate::error::EvaluatorError::CallDepthExceeded`] instead of
//! exhausting the host stack. It is plain data passed in by the embedder, never sourced
//! from `std::env` or a config file.

/// Limits a [`crate::local_store::LocalStore`] enforces during evaluation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EvaluatorLimits {
    /// Maximum nesting depth of `evaluate` calls before `CallDepthExceeded` is raised.
    pub max_call_depth: u32,
}

impl EvaluatorLimits {
    /// A generous default: deep enough for ordinary recursive programs, shallow enough
    /// to fail before the host's own stack would.
    pub const DEFAULT_MAX_CALL_DEPTH: u32 = 4096;
}

impl Default for EvaluatorLimits {
    fn default() -> Self {
        EvaluatorLimits {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_the_documented_constant() {
        let limits = EvaluatorLimits::default();
        assert_eq!(limits.max_call_depth, EvaluatorLimits::DEFAULT_MAX_CALL_DEPTH);
    }
}
