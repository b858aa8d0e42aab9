//! The weight-domain contract every analysis plugs in through.
//!
//! A weight domain is a bounded idempotent semiring `(W, ⊕, ⊗, 0, 1)`:
//!
//! - `⊕` ([`Semiring::combine`]) is commutative, associative, and idempotent
//!   with identity `0`;
//! - `⊗` ([`Semiring::extend`]) is associative with identity `1` and
//!   distributes over `⊕` on both sides;
//! - `0` annihilates `⊗`.
//!
//! The saturation and path-summary engines only ever talk to weights through
//! this trait. Weights are treated as immutable: every new weight is produced
//! by the domain, never patched in place. Convergence of the fixpoints
//! requires the domain to have no infinite ascending `⊕`-chains.

mod pair;

pub use pair::SemElemPair;

use std::fmt;

/// A value in a bounded idempotent semiring.
///
/// `zero` and `one` are associated constructors, so a domain is free to hand
/// out cached or freshly built values; equality is structural either way.
/// Implementations provide the five core operations; `delta` and `quasi_one`
/// have defaults that are correct for every domain.
pub trait Semiring: Clone + fmt::Debug {
    /// The `⊕` identity and `⊗` annihilator.
    fn zero() -> Self;

    /// The `⊗` identity.
    fn one() -> Self;

    /// `self ⊗ other`. Not assumed commutative.
    fn extend(&self, other: &Self) -> Self;

    /// `self ⊕ other`.
    fn combine(&self, other: &Self) -> Self;

    /// Structural equality within the domain.
    fn equal(&self, other: &Self) -> bool;

    /// True when this weight equals `zero()`.
    fn is_zero(&self) -> bool {
        self.equal(&Self::zero())
    }

    /// Combine with a previous value, reporting the change.
    ///
    /// Returns `(self ⊕ old, diff)` where `diff ⊕ old = self ⊕ old`. The
    /// difference bounds how much chaotic iteration still has to propagate:
    /// it must be `zero()` when the combine leaves `old` unchanged, and a
    /// domain that can compute a smaller difference than `self` should
    /// override this.
    fn delta(&self, old: &Self) -> (Self, Self) {
        let combined = self.combine(old);
        if combined.equal(old) {
            (combined, Self::zero())
        } else {
            (combined, self.clone())
        }
    }

    /// Right identity substituted for a mid-state's accumulated weight.
    ///
    /// post\* folds push-rule contributions into a per-mid-state quasi weight
    /// and labels the entry transition with `quasi_one` of it, so that later
    /// extension past the mid-state does not double-count. For ordinary
    /// domains this is `one()`; witness-carrying domains override it.
    fn quasi_one(&self) -> Self {
        Self::one()
    }
}
