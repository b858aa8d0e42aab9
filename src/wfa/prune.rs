//! Chop an automaton down to its useful transitions.

use rustc_hash::FxHashSet;

use crate::base::Key;
use crate::semiring::Semiring;
use crate::wfa::Wfa;

impl<W: Semiring> Wfa<W> {
    /// Remove every transition not on some path from the initial state to a
    /// final state.
    ///
    /// Two reachability passes: forward from the initial state and backward
    /// from the accepting states. A transition survives only if its source is
    /// forward-reachable and its target reaches acceptance. States are left
    /// in place even when all their transitions go.
    pub fn prune(&mut self) {
        let forward = self.forward_reachable();
        let backward = self.backward_useful();

        let doomed: Vec<(Key, Key, Key)> = self
            .transitions()
            .filter(|t| !(forward.contains(&t.from()) && backward.contains(&t.to())))
            .map(|t| (t.from(), t.stack(), t.to()))
            .collect();
        for (from, stack, to) in doomed {
            self.erase(from, stack, to);
        }
    }

    fn forward_reachable(&self) -> FxHashSet<Key> {
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.initial_state()];
        while let Some(q) = stack.pop() {
            if !seen.insert(q) {
                continue;
            }
            for &tid in self.out_bucket(q) {
                stack.push(self.trans(tid).to());
            }
        }
        seen
    }

    fn backward_useful(&self) -> FxHashSet<Key> {
        let mut preds: rustc_hash::FxHashMap<Key, Vec<Key>> = rustc_hash::FxHashMap::default();
        for t in self.transitions() {
            preds.entry(t.to()).or_default().push(t.from());
        }
        let mut seen = FxHashSet::default();
        let mut stack: Vec<Key> = self.final_states().collect();
        while let Some(q) = stack.pop() {
            if !seen.insert(q) {
                continue;
            }
            if let Some(sources) = preds.get(&q) {
                stack.extend(sources.iter().copied());
            }
        }
        seen
    }
}
