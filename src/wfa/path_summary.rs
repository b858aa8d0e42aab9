//! Backward state-weight fixpoint over a saturated automaton.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::{key_str, FifoWorklist, Key, Worklist};
use crate::semiring::Semiring;
use crate::wfa::{Query, Wfa};

impl<W: Semiring> Wfa<W> {
    /// Assign each state the combined weight of all paths from it to an
    /// accepting state.
    ///
    /// Accepting states end with weight `one`; states that reach no accepting
    /// state end with `zero`. Transition weights are read as computed by a
    /// prior saturation; the extension order follows [`Wfa::query`]. Re-running
    /// the summary recomputes from scratch and yields identical weights.
    pub fn path_summary(&mut self) {
        let mut worklist = FifoWorklist::new();
        self.path_summary_with(&mut worklist);
    }

    /// [`Wfa::path_summary`] with a caller-supplied worklist.
    pub fn path_summary_with(&mut self, worklist: &mut dyn Worklist<Key>) {
        worklist.clear();
        let preds = self.summary_setup(worklist);

        let mut pops = 0u64;
        while let Some(q) = worklist.get() {
            pops += 1;
            let delta = {
                let state = self.state_mut(q).expect("worklist holds known states");
                state.marked = false;
                state.take_delta()
            };
            trace!(state = %key_str(q), "path summary pop");

            let Some(pred_keys) = preds.get(&q) else {
                // The initial state typically has no predecessors.
                continue;
            };

            for &p in pred_keys {
                // New contribution to W(p): combine over every (p, _, q).
                let mut new = W::zero();
                for &tid in self.out_bucket(p) {
                    let t = self.trans(tid);
                    if t.to() != q {
                        continue;
                    }
                    let extended = match self.query() {
                        Query::Inorder => t.weight().extend(&delta),
                        Query::Reverse => delta.extend(t.weight()),
                    };
                    new = new.combine(&extended);
                }

                let state = self.state_mut(p).expect("predecessor is a known state");
                let (combined, diff) = new.delta(&state.weight);
                state.weight = combined;
                if state.marked {
                    state.delta = state.delta.combine(&diff);
                } else if !diff.is_zero() {
                    state.delta = diff;
                    state.marked = true;
                    worklist.put(p);
                }
            }
        }
        debug!(pops, "path summary converged");
    }

    /// Reset state weights for the fixpoint and seed the worklist with the
    /// accepting states. Returns the predecessor index.
    fn summary_setup(&mut self, worklist: &mut dyn Worklist<Key>) -> FxHashMap<Key, IndexSet<Key>> {
        let mut preds: FxHashMap<Key, IndexSet<Key>> = FxHashMap::default();
        for t in self.transitions() {
            preds.entry(t.to()).or_default().insert(t.from());
        }

        let seeds: Vec<Key> = self.states().collect();
        for key in seeds {
            let accepting = self.is_final_state(key);
            let state = self.state_mut(key).expect("iterating known states");
            if accepting {
                state.weight = W::one();
                state.delta = W::one();
                state.marked = true;
                worklist.put(key);
            } else {
                state.weight = W::zero();
                state.delta = W::zero();
                state.marked = false;
            }
        }
        preds
    }
}
