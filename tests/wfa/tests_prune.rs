//! Pruning to the initial-to-final chop.

use pushdown::domains::Reach;
use pushdown::{Query, Semiring, Wfa};

use crate::helpers::k;

#[test]
fn test_prune_keeps_only_accepting_paths() {
    let (s, t, u) = (k("pru_s"), k("pru_t"), k("pru_u"));
    let (orphan, sink, island) = (k("pru_orphan"), k("pru_sink"), k("pru_island"));
    let a = k("pru_a");

    let mut fa = Wfa::new(Query::Inorder);
    fa.set_initial_state(s);
    fa.add_final_state(u);
    // The useful chop.
    fa.add_trans(s, a, t, Reach::one());
    fa.add_trans(t, a, u, Reach::one());
    // Reachable, never accepts.
    fa.add_trans(t, a, sink, Reach::one());
    fa.add_trans(sink, a, sink, Reach::one());
    // Accepts, never reached.
    fa.add_trans(orphan, a, u, Reach::one());
    // Neither.
    fa.add_trans(island, a, island, Reach::one());

    fa.prune();

    assert_eq!(fa.transition_count(), 2);
    for t in fa.transitions() {
        // Every survivor must sit on an initial-to-final path.
        assert!([s, k("pru_t")].contains(&t.from()));
        assert!([k("pru_t"), u].contains(&t.to()));
    }
}

#[test]
fn test_prune_on_empty_final_set_clears_transitions() {
    let (s, t) = (k("pru2_s"), k("pru2_t"));
    let mut fa = Wfa::new(Query::Inorder);
    fa.set_initial_state(s);
    fa.add_trans(s, k("pru2_a"), t, Reach::one());

    fa.prune();
    assert_eq!(fa.transition_count(), 0);
}

#[test]
fn test_prune_is_idempotent() {
    let (s, u) = (k("pru3_s"), k("pru3_u"));
    let a = k("pru3_a");
    let mut fa = Wfa::new(Query::Inorder);
    fa.set_initial_state(s);
    fa.add_final_state(u);
    fa.add_trans(s, a, u, Reach::one());
    fa.add_trans(s, a, k("pru3_dead"), Reach::one());

    fa.prune();
    let after_first = fa.transition_count();
    fa.prune();
    assert_eq!(fa.transition_count(), after_first);
}
