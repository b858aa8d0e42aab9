//! Error types for pushdown-system operations.

use thiserror::Error;

use crate::base::Key;

/// Errors surfaced by rule construction and saturation.
///
/// Absent-but-expected lookups (an unknown state, a missing transition) are
/// `Option`s at the call site, not errors. Domain mismatches cannot occur:
/// a pushdown system and the automata it saturates share one weight type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WpdsError {
    /// Epsilon was passed where a real key is required.
    #[error("epsilon is not a valid {position} in a rule")]
    IllegalKey {
        /// Which slot of the rule was epsilon.
        position: &'static str,
    },

    /// A pop rule carried a second right-hand stack symbol.
    #[error("pop rule cannot push a second stack symbol {stack2:?}")]
    MalformedPopRule { stack2: Key },

    /// Saturation exceeded its step bound without reaching a fixpoint.
    ///
    /// This is how a weight domain with an infinite ascending chain shows up.
    /// The partial automaton is discarded.
    #[error("saturation did not converge within {steps} steps")]
    SemiringOverflow { steps: u64 },
}

/// Convenience alias used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, WpdsError>;
