//! Weighted pushdown systems and their saturation procedures.
//!
//! A [`Wpds`] is a set of weighted rewrite rules over configurations
//! `(control state, top-of-stack symbol)`. Configurations are interned in an
//! arena and linked both ways to the rules that mention them, which is what
//! lets saturation walk from a changed transition to exactly the rules that
//! can fire on it.
//!
//! The two queries are [`Wpds::prestar`] and [`Wpds::poststar`]: given an
//! automaton accepting a configuration set, they return an automaton
//! accepting everything that can reach (respectively be reached from) that
//! set, with weights combined over all witnessing rule sequences.

mod config;
mod poststar;
mod prestar;
mod rule;
mod wrapper;

pub use config::{Config, ConfigId};
pub use rule::{Rule, RuleId, RuleKind};
pub use wrapper::Wrapper;

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::base::{key_str, Key, Worklist, EPSILON};
use crate::error::{Result, WpdsError};
use crate::semiring::Semiring;
use crate::wfa::{TransId, Wfa};

/// A weighted pushdown system.
pub struct Wpds<W> {
    configs: Vec<Config>,
    config_index: IndexMap<(Key, Key), ConfigId>,
    rules: Vec<Rule<W>>,
    /// Configurations `(p, ε)` that appear as pop-rule targets.
    rule_zeroes: IndexSet<ConfigId>,
    /// Push rules indexed by their second pushed symbol.
    r2hash: IndexMap<Key, Vec<RuleId>>,
    wrapper: Option<Box<dyn Wrapper<W>>>,
    step_bound: Option<u64>,
}

impl<W: Semiring> Wpds<W> {
    pub fn new() -> Self {
        Self {
            configs: Vec::new(),
            config_index: IndexMap::new(),
            rules: Vec::new(),
            rule_zeroes: IndexSet::new(),
            r2hash: IndexMap::new(),
            wrapper: None,
            step_bound: None,
        }
    }

    /// A system whose rule and copied-transition weights pass through
    /// `wrapper` first.
    pub fn with_wrapper(wrapper: Box<dyn Wrapper<W>>) -> Self {
        let mut wpds = Self::new();
        wpds.wrapper = Some(wrapper);
        wpds
    }

    /// Bound the number of saturation steps.
    ///
    /// A domain with an infinite ascending chain never converges; the bound
    /// turns that into a [`WpdsError::SemiringOverflow`] instead of a hang.
    /// `None` (the default) runs unbounded.
    pub fn set_step_bound(&mut self, bound: Option<u64>) {
        self.step_bound = bound;
    }

    /// Add a pop rule `(p, γ) → (p′, ε)`.
    pub fn add_pop_rule(&mut self, p: Key, gamma: Key, p2: Key, weight: W) -> Result<RuleId> {
        self.add_rule(p, gamma, p2, EPSILON, EPSILON, weight)
    }

    /// Add a step rule `(p, γ) → (p′, γ′)`.
    pub fn add_step_rule(
        &mut self,
        p: Key,
        gamma: Key,
        p2: Key,
        gamma2: Key,
        weight: W,
    ) -> Result<RuleId> {
        self.add_rule(p, gamma, p2, gamma2, EPSILON, weight)
    }

    /// Add a push rule `(p, γ) → (p′, γ₁ γ₂)`.
    pub fn add_push_rule(
        &mut self,
        p: Key,
        gamma: Key,
        p2: Key,
        gamma1: Key,
        gamma2: Key,
        weight: W,
    ) -> Result<RuleId> {
        self.add_rule(p, gamma, p2, gamma1, gamma2, weight)
    }

    /// Add a rule of any shape.
    ///
    /// The left-hand side and the target state must be real keys. A rule with
    /// the same configurations and second symbol as an existing one combines
    /// its weight into that rule instead of duplicating it.
    pub fn add_rule(
        &mut self,
        from_state: Key,
        from_stack: Key,
        to_state: Key,
        to_stack1: Key,
        to_stack2: Key,
        weight: W,
    ) -> Result<RuleId> {
        if from_state == EPSILON {
            return Err(WpdsError::IllegalKey {
                position: "source state",
            });
        }
        if from_stack == EPSILON {
            return Err(WpdsError::IllegalKey {
                position: "source stack symbol",
            });
        }
        if to_state == EPSILON {
            return Err(WpdsError::IllegalKey {
                position: "target state",
            });
        }
        if to_stack1 == EPSILON && to_stack2 != EPSILON {
            return Err(WpdsError::MalformedPopRule { stack2: to_stack2 });
        }

        let from = self.make_config(from_state, from_stack);
        let to = self.make_config(to_state, to_stack1);
        if to_stack1 == EPSILON {
            self.rule_zeroes.insert(to);
        }

        let mut candidate = Rule {
            from,
            to,
            from_state,
            from_stack,
            to_state,
            to_stack1,
            to_stack2,
            weight,
        };
        if let Some(wrapper) = &self.wrapper {
            candidate.weight = wrapper.wrap_rule(&candidate);
        }

        let existing = self.configs[from.index()]
            .forward
            .iter()
            .copied()
            .find(|&rid| {
                let r = &self.rules[rid.index()];
                r.to == to && r.to_stack2 == to_stack2
            });
        if let Some(rid) = existing {
            let rule = &mut self.rules[rid.index()];
            rule.weight = rule.weight.combine(&candidate.weight);
            return Ok(rid);
        }

        let rid = RuleId::new(self.rules.len());
        trace!(rule = %candidate, "adding rule");
        self.rules.push(candidate);
        self.configs[from.index()].forward.push(rid);
        self.configs[to.index()].backward.push(rid);
        if to_stack2 != EPSILON {
            self.r2hash.entry(to_stack2).or_default().push(rid);
        }
        Ok(rid)
    }

    pub fn rule(&self, id: RuleId) -> &Rule<W> {
        &self.rules[id.index()]
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule<W>> {
        self.rules.iter()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Callback form of [`Wpds::rules`].
    pub fn for_each_rule<F: FnMut(&Rule<W>)>(&self, mut f: F) {
        for rule in &self.rules {
            f(rule);
        }
    }

    pub fn config(&self, id: ConfigId) -> &Config {
        &self.configs[id.index()]
    }

    pub fn find_config(&self, state: Key, stack: Key) -> Option<ConfigId> {
        self.config_index.get(&(state, stack)).copied()
    }

    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    /// Drop all rules and configurations.
    pub fn clear(&mut self) {
        self.configs.clear();
        self.config_index.clear();
        self.rules.clear();
        self.rule_zeroes.clear();
        self.r2hash.clear();
    }

    /// Intern the configuration `(state, stack)`.
    pub(crate) fn make_config(&mut self, state: Key, stack: Key) -> ConfigId {
        if let Some(&id) = self.config_index.get(&(state, stack)) {
            return id;
        }
        let id = ConfigId::new(self.configs.len());
        self.configs.push(Config::new(state, stack));
        self.config_index.insert((state, stack), id);
        id
    }

    /// Copy `input` into `fa`, linking every transition to the configuration
    /// of its `(from, stack)` pair and seeding the worklist with it.
    fn copy_and_link(
        &mut self,
        input: &Wfa<W>,
        fa: &mut Wfa<W>,
        worklist: &mut dyn Worklist<TransId>,
    ) {
        for key in input.states() {
            fa.add_state(key);
        }
        fa.set_initial_state(input.initial_state());
        for f in input.final_states() {
            fa.add_final_state(f);
        }
        for t in input.transitions() {
            let cfg = self.make_config(t.from(), t.stack());
            let weight = match &self.wrapper {
                Some(wrapper) => wrapper.wrap_trans(t.from(), t.stack(), t.to(), t.weight()),
                None => t.weight().clone(),
            };
            let (tid, _) = fa.insert_linked(t.from(), t.stack(), t.to(), weight, Some(cfg));
            enqueue(fa, worklist, tid);
        }
    }

    fn exceeded(&self, steps: u64) -> bool {
        self.step_bound.is_some_and(|bound| steps > bound)
    }
}

impl<W: Semiring> Default for Wpds<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Semiring> fmt::Display for Wpds<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WPDS -")?;
        for rule in &self.rules {
            writeln!(f, "  {rule}")?;
        }
        Ok(())
    }
}

/// A transition popped off the saturation worklist, flags cleared and delta
/// taken.
struct Popped<W> {
    from: Key,
    stack: Key,
    to: Key,
    config: Option<ConfigId>,
    delta: W,
}

fn pop_worklist<W: Semiring>(
    fa: &mut Wfa<W>,
    worklist: &mut dyn Worklist<TransId>,
) -> Option<Popped<W>> {
    let tid = worklist.get()?;
    let t = fa.trans_mut(tid);
    t.on_worklist = false;
    t.modified = false;
    let delta = t.take_delta();
    trace!(
        from = %key_str(t.from()),
        stack = %key_str(t.stack()),
        to = %key_str(t.to()),
        "saturation pop"
    );
    Some(Popped {
        from: t.from(),
        stack: t.stack(),
        to: t.to(),
        config: t.config(),
        delta,
    })
}

/// Insert a linked transition and enqueue it when the insert changed the
/// automaton.
fn update<W: Semiring>(
    fa: &mut Wfa<W>,
    worklist: &mut dyn Worklist<TransId>,
    from: Key,
    stack: Key,
    to: Key,
    weight: W,
    config: ConfigId,
) {
    let (tid, changed) = fa.insert_linked(from, stack, to, weight, Some(config));
    if changed {
        enqueue(fa, worklist, tid);
    }
}

/// Put a modified transition on the worklist unless it is already there.
fn enqueue<W: Semiring>(fa: &mut Wfa<W>, worklist: &mut dyn Worklist<TransId>, tid: TransId) {
    let t = fa.trans_mut(tid);
    if t.modified && !t.on_worklist {
        t.on_worklist = true;
        worklist.put(tid);
    }
}
