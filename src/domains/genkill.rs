//! Gen/kill transformer weights for bit-vector style dataflow problems.
//!
//! A non-zero weight is the function `λS.(S ∖ kill) ∪ gen`. Two invariants
//! keep representations canonical:
//!
//! - the kill set never overlaps the gen set, established by [`GenKill::make`]
//!   which normalises the kill set against the gen set;
//! - `one` is exactly the transformer with two empty sets, and `zero` is a
//!   sentinel that is not any gen/kill pair at all — it maps to no function
//!   and annihilates extend.

use std::collections::BTreeSet;

use smol_str::SmolStr;

use crate::semiring::Semiring;

/// Set operations a gen/kill instantiation needs.
///
/// Any finite-set representation works: ordered sets of names, bit vectors,
/// sorted vectors. `diff` is also used for the kill-against-gen
/// normalisation.
pub trait KillGenSet: Clone + Eq + std::fmt::Debug {
    fn empty() -> Self;
    fn is_empty(&self) -> bool;
    fn diff(&self, other: &Self) -> Self;
    fn union(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
}

/// A gen/kill dataflow weight over set type `S`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenKill<S> {
    /// The annihilator. Not a transformer; compared only by variant.
    Zero,
    /// The function `λS.(S ∖ kill) ∪ gen`, with the sets disjoint.
    Transformer { kill_set: S, gen_set: S },
}

impl<S: KillGenSet> GenKill<S> {
    /// Build a transformer, normalising so the kill set excludes the gen set.
    pub fn make(kill_set: S, gen_set: S) -> Self {
        let kill_set = kill_set.diff(&gen_set);
        GenKill::Transformer { kill_set, gen_set }
    }

    /// Apply the transformer to an input set.
    ///
    /// Panics on `Zero`, which maps to no function.
    pub fn apply(&self, input: &S) -> S {
        match self {
            GenKill::Zero => panic!("cannot apply the zero gen/kill weight"),
            GenKill::Transformer { kill_set, gen_set } => input.diff(kill_set).union(gen_set),
        }
    }

    pub fn kill_set(&self) -> Option<&S> {
        match self {
            GenKill::Zero => None,
            GenKill::Transformer { kill_set, .. } => Some(kill_set),
        }
    }

    pub fn gen_set(&self) -> Option<&S> {
        match self {
            GenKill::Zero => None,
            GenKill::Transformer { gen_set, .. } => Some(gen_set),
        }
    }
}

impl<S: KillGenSet> Semiring for GenKill<S> {
    fn zero() -> Self {
        GenKill::Zero
    }

    fn one() -> Self {
        GenKill::Transformer {
            kill_set: S::empty(),
            gen_set: S::empty(),
        }
    }

    /// Function composition: `self` first, then `other`.
    fn extend(&self, other: &Self) -> Self {
        let (k1, g1) = match self {
            GenKill::Zero => return GenKill::Zero,
            GenKill::Transformer { kill_set, gen_set } => (kill_set, gen_set),
        };
        let (k2, g2) = match other {
            GenKill::Zero => return GenKill::Zero,
            GenKill::Transformer { kill_set, gen_set } => (kill_set, gen_set),
        };
        GenKill::make(k1.union(k2), g1.diff(k2).union(g2))
    }

    fn combine(&self, other: &Self) -> Self {
        let (k1, g1) = match self {
            GenKill::Zero => return other.clone(),
            GenKill::Transformer { kill_set, gen_set } => (kill_set, gen_set),
        };
        let (k2, g2) = match other {
            GenKill::Zero => return self.clone(),
            GenKill::Transformer { kill_set, gen_set } => (kill_set, gen_set),
        };
        GenKill::make(k1.intersect(k2), g1.union(g2))
    }

    fn equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// Ordered set of variable names, the ready-made [`KillGenSet`].
pub type VarSet = BTreeSet<SmolStr>;

impl KillGenSet for VarSet {
    fn empty() -> Self {
        BTreeSet::new()
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }

    fn diff(&self, other: &Self) -> Self {
        self.difference(other).cloned().collect()
    }

    fn union(&self, other: &Self) -> Self {
        self.union(other).cloned().collect()
    }

    fn intersect(&self, other: &Self) -> Self {
        self.intersection(other).cloned().collect()
    }
}

/// Build a [`VarSet`] from names.
pub fn vars<I, T>(names: I) -> VarSet
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    names.into_iter().map(|n| SmolStr::new(n.as_ref())).collect()
}
