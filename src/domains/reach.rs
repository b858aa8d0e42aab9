//! Two-point reachability domain.

use crate::semiring::Semiring;

/// The smallest useful weight domain: "can this configuration be reached".
///
/// `one` is reached, `zero` is not; extend is conjunction along a path and
/// combine is disjunction across paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach {
    reached: bool,
}

impl Reach {
    pub fn new(reached: bool) -> Self {
        Self { reached }
    }

    pub fn is_reached(self) -> bool {
        self.reached
    }
}

impl Semiring for Reach {
    fn zero() -> Self {
        Reach::new(false)
    }

    fn one() -> Self {
        Reach::new(true)
    }

    fn extend(&self, other: &Self) -> Self {
        Reach::new(self.reached && other.reached)
    }

    fn combine(&self, other: &Self) -> Self {
        Reach::new(self.reached || other.reached)
    }

    fn equal(&self, other: &Self) -> bool {
        self.reached == other.reached
    }
}
