//! Weighted finite automata over pushdown configurations.
//!
//! A [`Wfa`] is a mutable store of weighted transitions representing a
//! regular set of configurations `(state, stack-word)`. Saturation reads and
//! writes it through three indexes that are kept consistent at all times:
//!
//! - `kpmap` - `(from, stack)` pair to the transitions carrying that pair
//! - `epsmap` - target state to the epsilon transitions ending there
//! - per-state outgoing transition lists
//!
//! Inserting a transition whose `(from, stack, to)` triple already exists
//! combines weights rather than duplicating the triple. The automaton also
//! hosts the fixpoints that are pure automaton computations: [`Wfa::path_summary`],
//! [`Wfa::intersect`], and [`Wfa::prune`].

mod intersect;
mod path_summary;
mod prune;
mod state;
mod trans;

pub use intersect::{KeepBoth, KeepLeft, KeepRight, WeightMaker};
pub use state::State;
pub use trans::{Trans, TransId};

use std::fmt;
use std::fmt::Write as _;

use indexmap::{IndexMap, IndexSet};

use crate::base::{key_str, Key, EPSILON};
use crate::semiring::Semiring;
use crate::wpds::ConfigId;

/// Orientation of weight extension when walking paths backward.
///
/// Some domains read a path's weight left-to-right (`Inorder`, extension is
/// `w ⊗ δ`), others right-to-left (`Reverse`, `δ ⊗ w`). Extension is not
/// assumed commutative, so the orientation travels with the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Query {
    #[default]
    Inorder,
    Reverse,
}

/// A weighted finite automaton.
#[derive(Debug, Clone)]
pub struct Wfa<W> {
    /// Slotted transition arena; erased slots are recycled.
    slots: Vec<Option<Trans<W>>>,
    free: Vec<TransId>,
    states: IndexMap<Key, State<W>>,
    kpmap: IndexMap<(Key, Key), Vec<TransId>>,
    epsmap: IndexMap<Key, Vec<TransId>>,
    initial: Key,
    finals: IndexSet<Key>,
    query: Query,
}

impl<W: Semiring> Wfa<W> {
    pub fn new(query: Query) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            states: IndexMap::new(),
            kpmap: IndexMap::new(),
            epsmap: IndexMap::new(),
            initial: EPSILON,
            finals: IndexSet::new(),
            query,
        }
    }

    pub fn query(&self) -> Query {
        self.query
    }

    pub fn set_query(&mut self, query: Query) -> Query {
        std::mem::replace(&mut self.query, query)
    }

    /// The initial state, or [`EPSILON`] if none was set.
    pub fn initial_state(&self) -> Key {
        self.initial
    }

    /// Set the initial state, returning the previous one.
    pub fn set_initial_state(&mut self, key: Key) -> Key {
        self.add_state(key);
        std::mem::replace(&mut self.initial, key)
    }

    pub fn add_final_state(&mut self, key: Key) {
        self.add_state(key);
        self.finals.insert(key);
    }

    pub fn is_final_state(&self, key: Key) -> bool {
        self.finals.contains(&key)
    }

    pub fn final_states(&self) -> impl Iterator<Item = Key> + '_ {
        self.finals.iter().copied()
    }

    /// All state keys, in insertion order.
    pub fn states(&self) -> impl Iterator<Item = Key> + '_ {
        self.states.keys().copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Look up a state record; `None` for keys not in the automaton.
    pub fn state(&self, key: Key) -> Option<&State<W>> {
        self.states.get(&key)
    }

    pub(crate) fn state_mut(&mut self, key: Key) -> Option<&mut State<W>> {
        self.states.get_mut(&key)
    }

    /// Ensure `key` is a state of the automaton.
    pub fn add_state(&mut self, key: Key) {
        self.states.entry(key).or_insert_with(|| State::new(key));
    }

    /// Insert `(from, stack, to, weight)`, combining on a duplicate triple.
    ///
    /// Endpoint states are created as needed.
    pub fn add_trans(&mut self, from: Key, stack: Key, to: Key, weight: W) {
        self.insert_linked(from, stack, to, weight, None);
    }

    /// Insert keeping saturation bookkeeping.
    ///
    /// Returns the transition's id and whether the insert changed its weight.
    /// On a duplicate triple the existing back reference wins; `config` only
    /// lands on newly created transitions.
    pub(crate) fn insert_linked(
        &mut self,
        from: Key,
        stack: Key,
        to: Key,
        weight: W,
        config: Option<ConfigId>,
    ) -> (TransId, bool) {
        self.add_state(from);
        self.add_state(to);

        if let Some(tid) = self.find_id(from, stack, to) {
            let changed = self.trans_mut(tid).combine_weight(&weight);
            return (tid, changed);
        }

        let trans = Trans::new(from, stack, to, weight, config);
        let tid = match self.free.pop() {
            Some(tid) => {
                self.slots[tid.index()] = Some(trans);
                tid
            }
            None => {
                let tid = TransId::new(self.slots.len());
                self.slots.push(Some(trans));
                tid
            }
        };

        self.kpmap.entry((from, stack)).or_default().push(tid);
        if stack == EPSILON {
            self.epsmap.entry(to).or_default().push(tid);
        }
        self.states
            .get_mut(&from)
            .expect("from-state was just added")
            .out
            .push(tid);
        (tid, true)
    }

    /// Find the transition `(from, stack, to)`.
    pub fn find(&self, from: Key, stack: Key, to: Key) -> Option<&Trans<W>> {
        self.find_id(from, stack, to).map(|tid| self.trans(tid))
    }

    pub(crate) fn find_id(&self, from: Key, stack: Key, to: Key) -> Option<TransId> {
        let bucket = self.kpmap.get(&(from, stack))?;
        bucket
            .iter()
            .copied()
            .find(|&tid| self.trans(tid).to == to)
    }

    /// Remove the transition `(from, stack, to)` from every index.
    pub fn erase(&mut self, from: Key, stack: Key, to: Key) {
        if let Some(tid) = self.find_id(from, stack, to) {
            self.erase_id(tid);
        }
    }

    /// Remove every transition leaving `q` and clear its outgoing list.
    ///
    /// Transitions into `q` stay; [`Wfa::prune`] is the whole-automaton chop.
    /// Returns false when `q` is not a state of the automaton.
    pub fn erase_state(&mut self, q: Key) -> bool {
        let Some(state) = self.states.get_mut(&q) else {
            return false;
        };
        let out = std::mem::take(&mut state.out);
        for tid in out {
            self.unindex(tid);
            self.slots[tid.index()] = None;
            self.free.push(tid);
        }
        true
    }

    /// Drop all states and transitions. The query orientation survives.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.states.clear();
        self.kpmap.clear();
        self.epsmap.clear();
        self.finals.clear();
        self.initial = EPSILON;
    }

    pub fn transition_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Visit every transition exactly once, in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = &Trans<W>> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Callback form of [`Wfa::transitions`].
    pub fn for_each<F: FnMut(&Trans<W>)>(&self, mut f: F) {
        for trans in self.transitions() {
            f(trans);
        }
    }

    pub(crate) fn trans(&self, tid: TransId) -> &Trans<W> {
        self.slots[tid.index()]
            .as_ref()
            .expect("transition id points at an erased slot")
    }

    pub(crate) fn trans_mut(&mut self, tid: TransId) -> &mut Trans<W> {
        self.slots[tid.index()]
            .as_mut()
            .expect("transition id points at an erased slot")
    }

    pub(crate) fn kp_bucket(&self, from: Key, stack: Key) -> &[TransId] {
        self.kpmap
            .get(&(from, stack))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn eps_bucket(&self, to: Key) -> &[TransId] {
        self.epsmap.get(&to).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn out_bucket(&self, q: Key) -> &[TransId] {
        self.states.get(&q).map(|s| s.out.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn kp_buckets(&self) -> impl Iterator<Item = ((Key, Key), &[TransId])> {
        self.kpmap.iter().map(|(&pair, bucket)| (pair, bucket.as_slice()))
    }

    pub(crate) fn transition_ids(&self) -> impl Iterator<Item = (TransId, &Trans<W>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (TransId::new(i), t)))
    }

    pub(crate) fn erase_id(&mut self, tid: TransId) {
        self.unindex(tid);
        let from = self.trans(tid).from;
        if let Some(state) = self.states.get_mut(&from) {
            state.out.retain(|&t| t != tid);
        }
        self.slots[tid.index()] = None;
        self.free.push(tid);
    }

    /// Remove `tid` from `kpmap` and `epsmap` (not the from-state list).
    fn unindex(&mut self, tid: TransId) {
        let (from, stack, to) = {
            let t = self.trans(tid);
            (t.from, t.stack, t.to)
        };
        if let Some(bucket) = self.kpmap.get_mut(&(from, stack)) {
            bucket.retain(|&t| t != tid);
        }
        if stack == EPSILON {
            if let Some(bucket) = self.epsmap.get_mut(&to) {
                bucket.retain(|&t| t != tid);
            }
        }
    }

    /// Graphviz rendering for debugging. The format is not stable.
    pub fn to_dot(&self, show_weights: bool) -> String {
        let mut out = String::from("digraph wfa {\n");
        for t in self.transitions() {
            let label = if show_weights {
                format!("{} / {:?}", key_str(t.stack), t.weight)
            } else {
                key_str(t.stack).to_string()
            };
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                key_str(t.from),
                key_str(t.to),
                label
            );
        }
        for key in self.states() {
            let attrs = if key == self.initial {
                ",color=green,style=filled"
            } else if self.is_final_state(key) {
                ",color=lightblue,style=filled"
            } else {
                ""
            };
            let _ = writeln!(out, "    \"{0}\" [label=\"{0}\"{1}];", key_str(key), attrs);
        }
        out.push_str("}\n");
        out
    }
}

impl<W: Semiring> Default for Wfa<W> {
    fn default() -> Self {
        Self::new(Query::Inorder)
    }
}

impl<W: Semiring> fmt::Display for Wfa<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WFA -")?;
        writeln!(f, "  initial: {}", key_str(self.initial))?;
        let names = |keys: &mut dyn Iterator<Item = Key>| {
            keys.map(|k| key_str(k).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "  Q: {{{}}}", names(&mut self.states()))?;
        writeln!(f, "  F: {{{}}}", names(&mut self.final_states()))?;
        for t in self.transitions() {
            writeln!(f, "  {t}")?;
        }
        Ok(())
    }
}
