//! Weighted transitions and their arena ids.

use std::fmt;

use crate::base::{key_str, Key};
use crate::semiring::Semiring;
use crate::wpds::ConfigId;

/// Arena index of a transition inside its owning automaton.
///
/// Ids are only meaningful against the automaton that produced them and may
/// be reused after an erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransId(pub(crate) u32);

impl TransId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A weighted transition `(from, stack, to, weight)`.
///
/// Identity is the key triple; inserting a duplicate triple combines weights
/// instead of adding a second transition. Beyond the weight, a transition
/// carries the bookkeeping saturation needs: the pending [`delta`](Self::delta)
/// not yet propagated to successors, a modified flag, a worklist mark, and an
/// optional back reference to the configuration that generated it.
#[derive(Debug, Clone)]
pub struct Trans<W> {
    pub(crate) from: Key,
    pub(crate) stack: Key,
    pub(crate) to: Key,
    pub(crate) weight: W,
    pub(crate) delta: W,
    pub(crate) modified: bool,
    pub(crate) on_worklist: bool,
    pub(crate) config: Option<ConfigId>,
}

impl<W: Semiring> Trans<W> {
    pub(crate) fn new(from: Key, stack: Key, to: Key, weight: W, config: Option<ConfigId>) -> Self {
        // A fresh transition has everything still to propagate.
        let delta = weight.clone();
        Self {
            from,
            stack,
            to,
            weight,
            delta,
            modified: true,
            on_worklist: false,
            config,
        }
    }

    pub fn from(&self) -> Key {
        self.from
    }

    pub fn stack(&self) -> Key {
        self.stack
    }

    pub fn to(&self) -> Key {
        self.to
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// The configuration that generated this transition, if saturation did.
    pub fn config(&self) -> Option<ConfigId> {
        self.config
    }

    /// Combine `w` into this transition's weight.
    ///
    /// Returns true when the weight actually changed; in that case the
    /// difference is folded into the pending delta and the modified flag is
    /// set.
    pub(crate) fn combine_weight(&mut self, w: &W) -> bool {
        let (combined, diff) = w.delta(&self.weight);
        if combined.equal(&self.weight) {
            return false;
        }
        self.weight = combined;
        self.delta = self.delta.combine(&diff);
        self.modified = true;
        true
    }

    /// Hand the accumulated delta to the saturation loop and reset it.
    pub(crate) fn take_delta(&mut self) -> W {
        std::mem::replace(&mut self.delta, W::zero())
    }
}

impl<W: fmt::Debug> fmt::Display for Trans<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) {:?}",
            key_str(self.from),
            key_str(self.stack),
            key_str(self.to),
            self.weight
        )
    }
}
