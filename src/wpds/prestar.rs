//! Backward saturation.
//!
//! `pre*` grows the input automaton until it accepts every configuration
//! that can reach the input set, weighting each by the combine over all rule
//! sequences that witness the reach.

use tracing::debug;

use crate::base::{FifoWorklist, Worklist};
use crate::error::{Result, WpdsError};
use crate::semiring::Semiring;
use crate::wfa::{TransId, Wfa};
use crate::wpds::{pop_worklist, update, ConfigId, Wpds};

impl<W: Semiring> Wpds<W> {
    /// `pre*` of the configuration set accepted by `input`.
    pub fn prestar(&mut self, input: &Wfa<W>) -> Result<Wfa<W>> {
        let mut worklist = FifoWorklist::new();
        self.prestar_with(input, &mut worklist)
    }

    /// [`Wpds::prestar`] with a caller-supplied worklist.
    pub fn prestar_with(
        &mut self,
        input: &Wfa<W>,
        worklist: &mut dyn Worklist<TransId>,
    ) -> Result<Wfa<W>> {
        worklist.clear();
        let mut fa = Wfa::new(input.query());
        self.copy_and_link(input, &mut fa, worklist);
        self.prestar_seed_pop_rules(&mut fa, worklist);

        let mut steps = 0u64;
        while let Some(t) = pop_worklist(&mut fa, worklist) {
            steps += 1;
            if self.exceeded(steps) {
                return Err(WpdsError::SemiringOverflow { steps });
            }

            // Fire every rule producing this transition's configuration.
            if let Some(cfg) = t.config {
                let backward = self.config(cfg).backward().to_vec();
                for rid in backward {
                    let r = self.rule(rid);
                    let w_rule = r.weight().extend(&t.delta);
                    if r.is_push() {
                        // (p″,γ″) → (p, γ γ₂): continue through every
                        // transition consuming γ₂ out of this one's target.
                        let (fs, fk, g2, fcfg) =
                            (r.from_state(), r.from_stack(), r.to_stack2(), r.from_config());
                        let bucket = fa.kp_bucket(t.to, g2).to_vec();
                        for tid2 in bucket {
                            let (weight, target) = {
                                let tp = fa.trans(tid2);
                                (w_rule.extend(tp.weight()), tp.to())
                            };
                            update(&mut fa, worklist, fs, fk, target, weight, fcfg);
                        }
                    } else {
                        update(
                            &mut fa,
                            worklist,
                            r.from_state(),
                            r.from_stack(),
                            t.to,
                            w_rule,
                            r.from_config(),
                        );
                    }
                }
            }

            // Push rules whose second symbol is this transition's stack: the
            // popped transition may complete a pair discovered out of order.
            let matching: Vec<_> = self
                .r2hash
                .get(&t.stack)
                .map(|rids| rids.to_vec())
                .unwrap_or_default();
            for rid in matching {
                let r = self.rule(rid);
                let found = fa
                    .find(r.to_state(), r.to_stack1(), t.from)
                    .map(|tp| tp.weight().clone());
                if let Some(w_mid) = found {
                    let weight = r.weight().extend(&w_mid).extend(&t.delta);
                    update(
                        &mut fa,
                        worklist,
                        r.from_state(),
                        r.from_stack(),
                        t.to,
                        weight,
                        r.from_config(),
                    );
                }
            }
        }
        debug!(steps, transitions = fa.transition_count(), "prestar converged");
        Ok(fa)
    }

    /// Seed `(p, γ, p′)` for every pop rule `(p,γ) → (p′,ε)`.
    fn prestar_seed_pop_rules(&mut self, fa: &mut Wfa<W>, worklist: &mut dyn Worklist<TransId>) {
        let zero_configs: Vec<ConfigId> = self.rule_zeroes.iter().copied().collect();
        for cfg in zero_configs {
            let backward = self.config(cfg).backward().to_vec();
            for rid in backward {
                let r = self.rule(rid);
                let (fs, fk, ts, weight, fcfg) = (
                    r.from_state(),
                    r.from_stack(),
                    r.to_state(),
                    r.weight().clone(),
                    r.from_config(),
                );
                update(fa, worklist, fs, fk, ts, weight, fcfg);
            }
        }
    }
}
