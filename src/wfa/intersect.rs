//! Product construction for weighted automata.

use rustc_hash::FxHashMap;

use crate::base::{get_key_pair, Key};
use crate::semiring::{SemElemPair, Semiring};
use crate::wfa::{TransId, Wfa};

/// Builds the product weight for a pair of matched transitions.
///
/// Intersection pairs transitions of two automata that share a stack symbol;
/// the weight maker decides what weight the product transition carries.
pub trait WeightMaker<A: Semiring, B: Semiring> {
    type Weight: Semiring;

    fn make_weight(&self, a: &A, b: &B) -> Self::Weight;
}

/// Keep the left automaton's weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepLeft;

impl<A: Semiring, B: Semiring> WeightMaker<A, B> for KeepLeft {
    type Weight = A;

    fn make_weight(&self, a: &A, _b: &B) -> A {
        a.clone()
    }
}

/// Keep the right automaton's weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepRight;

impl<A: Semiring, B: Semiring> WeightMaker<A, B> for KeepRight {
    type Weight = B;

    fn make_weight(&self, _a: &A, b: &B) -> B {
        b.clone()
    }
}

/// Keep both weights as a componentwise pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepBoth;

impl<A: Semiring, B: Semiring> WeightMaker<A, B> for KeepBoth {
    type Weight = SemElemPair<A, B>;

    fn make_weight(&self, a: &A, b: &B) -> SemElemPair<A, B> {
        SemElemPair::new(a.clone(), b.clone())
    }
}

impl<W: Semiring> Wfa<W> {
    /// Product of `self` and `other` under `maker`.
    ///
    /// States of the product are pair keys. The initial state is the pair of
    /// initials and the accepting set is the pairwise cross product. The
    /// right automaton is indexed by stack symbol once up front, and the
    /// index is probed once per `kpmap` bucket — every transition in a bucket
    /// shares its stack symbol.
    pub fn intersect<B, M>(&self, maker: &M, other: &Wfa<B>) -> Wfa<M::Weight>
    where
        B: Semiring,
        M: WeightMaker<W, B>,
    {
        let mut by_stack: FxHashMap<Key, Vec<TransId>> = FxHashMap::default();
        for (tid, t) in other.transition_ids() {
            by_stack.entry(t.stack()).or_default().push(tid);
        }

        let mut dest: Wfa<M::Weight> = Wfa::new(self.query());
        dest.set_initial_state(get_key_pair(self.initial_state(), other.initial_state()));
        for f1 in self.final_states() {
            for f2 in other.final_states() {
                dest.add_final_state(get_key_pair(f1, f2));
            }
        }

        for ((_, stack), bucket) in self.kp_buckets() {
            if bucket.is_empty() {
                continue;
            }
            let Some(candidates) = by_stack.get(&stack) else {
                continue;
            };
            for &tid in bucket {
                let t = self.trans(tid);
                for &oid in candidates {
                    let t2 = other.trans(oid);
                    dest.add_trans(
                        get_key_pair(t.from(), t2.from()),
                        stack,
                        get_key_pair(t.to(), t2.to()),
                        maker.make_weight(t.weight(), t2.weight()),
                    );
                }
            }
        }
        dest
    }
}
