//! Algebraic laws every shipped weight domain must satisfy.

use pushdown::domains::{vars, GenKill, Reach, VarSet};
use pushdown::{SemElemPair, Semiring};
use rstest::rstest;

use crate::helpers::check_semiring_laws;
use crate::helpers::tropical::MinPlus;

#[test]
fn test_reach_laws() {
    check_semiring_laws(&[Reach::zero(), Reach::one()]);
}

#[test]
fn test_genkill_laws() {
    let elems: Vec<GenKill<VarSet>> = vec![
        GenKill::zero(),
        GenKill::one(),
        GenKill::make(vars(["a"]), vars(["b"])),
        GenKill::make(vars(["b"]), vars(["a", "c"])),
        GenKill::make(vars(["a", "b", "c"]), VarSet::new()),
    ];
    check_semiring_laws(&elems);
}

#[test]
fn test_tropical_laws() {
    let elems = vec![
        MinPlus::zero(),
        MinPlus::one(),
        MinPlus::new(1),
        MinPlus::new(5),
        MinPlus::new(40),
    ];
    check_semiring_laws(&elems);
}

#[test]
fn test_pair_laws() {
    let elems = vec![
        SemElemPair::<Reach, MinPlus>::zero(),
        SemElemPair::<Reach, MinPlus>::one(),
        SemElemPair::new(Reach::one(), MinPlus::new(3)),
        SemElemPair::new(Reach::zero(), MinPlus::new(7)),
    ];
    check_semiring_laws(&elems);
}

#[rstest]
#[case(MinPlus::new(2), MinPlus::new(3), MinPlus::new(5))]
#[case(MinPlus::new(0), MinPlus::new(9), MinPlus::new(9))]
#[case(MinPlus::new(4), MinPlus::infinity(), MinPlus::infinity())]
fn test_tropical_extend_adds(#[case] a: MinPlus, #[case] b: MinPlus, #[case] expected: MinPlus) {
    assert!(a.extend(&b).equal(&expected));
}

#[rstest]
#[case(MinPlus::new(2), MinPlus::new(3), MinPlus::new(2))]
#[case(MinPlus::new(9), MinPlus::infinity(), MinPlus::new(9))]
#[case(MinPlus::infinity(), MinPlus::infinity(), MinPlus::infinity())]
fn test_tropical_combine_takes_min(
    #[case] a: MinPlus,
    #[case] b: MinPlus,
    #[case] expected: MinPlus,
) {
    assert!(a.combine(&b).equal(&expected));
}

#[test]
fn test_delta_difference_law() {
    // diff ⊕ old must equal new ⊕ old for every pair.
    let elems = [MinPlus::zero(), MinPlus::one(), MinPlus::new(3), MinPlus::new(8)];
    for new in &elems {
        for old in &elems {
            let (combined, diff) = new.delta(old);
            assert!(combined.equal(&new.combine(old)));
            assert!(diff.combine(old).equal(&combined));
        }
    }
}
