//! Forward saturation.
//!
//! `post*` grows the input automaton until it accepts every configuration
//! reachable from the input set. Push rules route through a generated
//! mid-state per procedure entry `(p′, γ′)`; the mid-state accumulates the
//! entry weight in its quasi slot so that several push rules sharing an entry
//! do not double-count through it.

use tracing::debug;

use crate::base::{get_key_pair, FifoWorklist, Key, Worklist, EPSILON};
use crate::error::{Result, WpdsError};
use crate::semiring::Semiring;
use crate::wfa::{TransId, Wfa};
use crate::wpds::{pop_worklist, update, Wpds};

impl<W: Semiring> Wpds<W> {
    /// `post*` of the configuration set accepted by `input`.
    pub fn poststar(&mut self, input: &Wfa<W>) -> Result<Wfa<W>> {
        let mut worklist = FifoWorklist::new();
        self.poststar_with(input, &mut worklist)
    }

    /// [`Wpds::poststar`] with a caller-supplied worklist.
    pub fn poststar_with(
        &mut self,
        input: &Wfa<W>,
        worklist: &mut dyn Worklist<TransId>,
    ) -> Result<Wfa<W>> {
        worklist.clear();
        let mut fa = Wfa::new(input.query());
        self.copy_and_link(input, &mut fa, worklist);

        // One mid-state per distinct push-rule entry point.
        let entries: Vec<(Key, Key)> = self
            .r2hash
            .values()
            .flatten()
            .map(|&rid| {
                let r = self.rule(rid);
                (r.to_state(), r.to_stack1())
            })
            .collect();
        for (state, stack) in entries {
            fa.add_state(get_key_pair(state, stack));
        }

        let mut steps = 0u64;
        while let Some(t) = pop_worklist(&mut fa, worklist) {
            steps += 1;
            if self.exceeded(steps) {
                return Err(WpdsError::SemiringOverflow { steps });
            }

            if t.stack != EPSILON {
                let Some(cfg) = t.config else {
                    continue;
                };
                let forward = self.config(cfg).forward().to_vec();
                for rid in forward {
                    let (to_state, to_stack1, to_stack2, w_r, to_cfg) = {
                        let r = self.rule(rid);
                        (
                            r.to_state(),
                            r.to_stack1(),
                            r.to_stack2(),
                            r.weight().clone(),
                            r.to_config(),
                        )
                    };
                    let w_rule = t.delta.extend(&w_r);

                    if to_stack2 == EPSILON {
                        // Pop and step rules rewrite in place.
                        update(&mut fa, worklist, to_state, to_stack1, t.to, w_rule, to_cfg);
                        continue;
                    }

                    // Push rule: route through the entry mid-state.
                    let mid = get_key_pair(to_state, to_stack1);
                    let (prime, prime_changed) =
                        fa.insert_linked(mid, to_stack2, t.to, w_rule.clone(), None);

                    let quasi = {
                        let state = fa.state_mut(mid).expect("mid-state was pre-allocated");
                        state.quasi = state.quasi.combine(&w_rule);
                        state.quasi.clone()
                    };
                    update(
                        &mut fa,
                        worklist,
                        to_state,
                        to_stack1,
                        mid,
                        quasi.quasi_one(),
                        to_cfg,
                    );

                    // A changed mid-state exit must be replayed through every
                    // epsilon transition already ending at its target.
                    if prime_changed {
                        let prime_delta = fa.trans(prime).delta.clone();
                        let eps_ids = fa.eps_bucket(t.to).to_vec();
                        for eid in eps_ids {
                            let (eps_from, eps_weight) = {
                                let e = fa.trans(eid);
                                (e.from(), e.weight().clone())
                            };
                            let eps_cfg = self.make_config(eps_from, to_stack2);
                            update(
                                &mut fa,
                                worklist,
                                eps_from,
                                to_stack2,
                                t.to,
                                prime_delta.extend(&eps_weight),
                                eps_cfg,
                            );
                        }
                    }
                }
            } else {
                // (p, ε, q) composes with every transition leaving q.
                let out = fa.out_bucket(t.to).to_vec();
                for oid in out {
                    let (stack, target, weight) = {
                        let o = fa.trans(oid);
                        (o.stack(), o.to(), o.weight().clone())
                    };
                    let cfg = self.make_config(t.from, stack);
                    update(
                        &mut fa,
                        worklist,
                        t.from,
                        stack,
                        target,
                        weight.extend(&t.delta),
                        cfg,
                    );
                }
            }
        }
        debug!(steps, transitions = fa.transition_count(), "poststar converged");
        Ok(fa)
    }
}
