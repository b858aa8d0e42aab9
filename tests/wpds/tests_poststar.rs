//! Forward-saturation tests.

use pushdown::domains::{vars, GenKill, VarSet};
use pushdown::{
    get_key_pair, FifoWorklist, LifoWorklist, Query, Semiring, Wfa, Wpds, EPSILON,
};

use crate::helpers::k;
use crate::helpers::tropical::MinPlus;

type W = GenKill<VarSet>;

fn gen_of(name: &str) -> W {
    W::make(VarSet::new(), vars([name]))
}

fn kill_of(name: &str) -> W {
    W::make(vars([name]), VarSet::new())
}

/// Loop through a call: (p,a) pushes b over a, (p,b) pops.
fn genkill_system() -> Wpds<W> {
    let (p, a, b) = (k("post_p"), k("post_a"), k("post_b"));
    let mut wpds = Wpds::new();
    wpds.add_push_rule(p, a, p, b, a, gen_of("x")).unwrap();
    wpds.add_pop_rule(p, b, p, kill_of("y")).unwrap();
    wpds
}

/// Input automaton accepting exactly (p, a).
fn accepts_p_a() -> Wfa<W> {
    let (p, a, acc) = (k("post_p"), k("post_a"), k("post_acc"));
    let mut fa = Wfa::new(Query::Inorder);
    fa.set_initial_state(p);
    fa.add_final_state(acc);
    fa.add_trans(p, a, acc, W::one());
    fa
}

#[test]
fn test_poststar_genkill_flows_through_call_and_return() {
    let (p, a, b, acc) = (k("post_p"), k("post_a"), k("post_b"), k("post_acc"));
    let mut wpds = genkill_system();

    let out = wpds.poststar(&accepts_p_a()).unwrap();
    let mid = get_key_pair(p, b);

    // The call enters the mid-state with the deferred quasi-one weight.
    let t = out.find(p, b, mid).expect("(p,b) entry must exist");
    assert!(t.weight().equal(&W::one()));
    // The saved return symbol carries the call weight.
    let t = out.find(mid, a, acc).expect("saved return must exist");
    assert!(t.weight().equal(&gen_of("x")));
    // The return pops through an epsilon transition into the mid-state.
    let t = out.find(p, EPSILON, mid).expect("return epsilon must exist");
    assert!(t.weight().equal(&kill_of("y")));

    // Around the loop, gen x then kill y composes to kill y, gen x.
    let around = gen_of("x").extend(&kill_of("y"));
    assert!(around.equal(&W::make(vars(["y"]), vars(["x"]))));
    // (p, a) is reached both trivially and around the loop.
    let t = out.find(p, a, acc).expect("(p,a) must survive post*");
    assert!(t.weight().equal(&W::one().combine(&around)));
}

#[test]
fn test_poststar_shared_entry_allocates_one_mid_state() {
    let (p, a, b, e) = (k("postd_p"), k("postd_a"), k("postd_b"), k("postd_e"));
    let (r1, r2, acc) = (k("postd_r1"), k("postd_r2"), k("postd_acc"));

    let mut wpds = Wpds::new();
    wpds.add_push_rule(p, a, p, e, r1, gen_of("x")).unwrap();
    wpds.add_push_rule(p, b, p, e, r2, gen_of("y")).unwrap();

    let mut input = Wfa::new(Query::Inorder);
    input.set_initial_state(p);
    input.add_final_state(acc);
    input.add_trans(p, a, acc, W::one());
    input.add_trans(p, b, acc, W::one());

    let out = wpds.poststar(&input).unwrap();

    // Exactly one mid-state serves both push rules: p, acc, and (p,e).
    let mid = get_key_pair(p, e);
    assert!(out.state(mid).is_some());
    assert_eq!(out.state_count(), 3);

    // Its quasi weight combines both call contributions.
    let quasi = out.state(mid).unwrap().quasi();
    assert!(quasi.equal(&gen_of("x").combine(&gen_of("y"))));

    // Both return symbols leave the shared mid-state.
    assert!(out.find(mid, r1, acc).is_some());
    assert!(out.find(mid, r2, acc).is_some());
}

#[test]
fn test_poststar_links_transitions_to_their_own_configuration() {
    let mut wpds = genkill_system();
    let out = wpds.poststar(&accepts_p_a()).unwrap();

    for t in out.transitions() {
        // Transitions out of generated mid-states carry no configuration.
        let Some(cfg) = t.config() else {
            assert_eq!(t.from(), get_key_pair(k("post_p"), k("post_b")));
            continue;
        };
        let cfg = wpds.config(cfg);
        assert_eq!(cfg.state(), t.from());
        assert_eq!(cfg.stack(), t.stack());
    }
}

#[test]
fn test_poststar_worklist_order_does_not_change_weights() {
    let mut wpds = genkill_system();
    let input = accepts_p_a();

    let fifo = wpds
        .poststar_with(&input, &mut FifoWorklist::new())
        .unwrap();
    let lifo = wpds
        .poststar_with(&input, &mut LifoWorklist::new())
        .unwrap();

    assert_eq!(fifo.transition_count(), lifo.transition_count());
    for t in fifo.transitions() {
        let other = lifo.find(t.from(), t.stack(), t.to()).unwrap();
        assert!(t.weight().equal(other.weight()));
    }
}

#[test]
fn test_poststar_monotone_under_added_rules() {
    let mut wpds = genkill_system();
    let input = accepts_p_a();
    let first = wpds.poststar(&input).unwrap();

    // A second way around the loop that generates more.
    wpds.add_pop_rule(k("post_p"), k("post_b"), k("post_p"), gen_of("z"))
        .unwrap();
    let second = wpds.poststar(&input).unwrap();

    for t in first.transitions() {
        let after = second
            .find(t.from(), t.stack(), t.to())
            .expect("adding rules never removes transitions");
        assert!(after.weight().combine(t.weight()).equal(after.weight()));
    }
}

#[test]
fn test_poststar_replays_changed_return_through_epsilon_at_target() {
    // A pop rule must fire before the push rule does, so that an epsilon
    // transition already ends at the shared target state q when the saved
    // return symbol is inserted. The replay then composes the return's
    // pending delta with that epsilon weight.
    let (p1, p2, p3, p4) = (k("pse_p1"), k("pse_p2"), k("pse_p3"), k("pse_p4"));
    let (a, c, d, e) = (k("pse_a"), k("pse_c"), k("pse_d"), k("pse_e"));
    let q = k("pse_q");

    let mut wpds = Wpds::new();
    wpds.add_pop_rule(p1, a, p2, MinPlus::new(3)).unwrap();
    wpds.add_push_rule(p3, c, p4, d, e, MinPlus::new(5)).unwrap();

    // FIFO order pops (p1,a,q) first, so (p2,ε,q) exists by the time the
    // push rule inserts (mid, e, q).
    let mut input = Wfa::new(Query::Inorder);
    input.set_initial_state(p1);
    input.add_final_state(q);
    input.add_trans(p1, a, q, MinPlus::one());
    input.add_trans(p3, c, q, MinPlus::one());

    let out = wpds.poststar(&input).unwrap();
    let mid = get_key_pair(p4, d);

    // The pieces the replay composes.
    let t = out.find(p2, EPSILON, q).expect("pop must leave an epsilon");
    assert!(t.weight().equal(&MinPlus::new(3)));
    let t = out.find(mid, e, q).expect("saved return must exist");
    assert!(t.weight().equal(&MinPlus::new(5)));

    // q has no outgoing transitions, so only the replay can produce this:
    // the return's delta (5) extended by the epsilon weight (3).
    let t = out
        .find(p2, e, q)
        .expect("replay must compose the return with the epsilon");
    assert!(t.weight().equal(&MinPlus::new(8)));
    let cfg = wpds.config(t.config().expect("replayed transition is linked"));
    assert_eq!(cfg.state(), p2);
    assert_eq!(cfg.stack(), e);
}

#[test]
fn test_poststar_output_answers_path_summary() {
    let mut wpds = genkill_system();
    let mut out = wpds.poststar(&accepts_p_a()).unwrap();

    out.path_summary();
    // The initial control state reads every accepted configuration.
    let w = out.state(k("post_p")).unwrap().weight();
    assert!(!w.is_zero());
}
