//! Tropical min-plus weights for shortest-path style tests.

use pushdown::Semiring;

/// Min-plus semiring: combine is minimum, extend is addition, zero is
/// infinity, one is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinPlus(Option<u64>);

impl MinPlus {
    pub fn new(cost: u64) -> Self {
        Self(Some(cost))
    }

    pub fn infinity() -> Self {
        Self(None)
    }

    pub fn cost(self) -> Option<u64> {
        self.0
    }
}

impl Semiring for MinPlus {
    fn zero() -> Self {
        Self::infinity()
    }

    fn one() -> Self {
        Self::new(0)
    }

    fn extend(&self, other: &Self) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self(Some(a + b)),
            _ => Self::infinity(),
        }
    }

    fn combine(&self, other: &Self) -> Self {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Self(Some(a.min(b))),
            (Some(a), None) | (None, Some(a)) => Self(Some(a)),
            (None, None) => Self::infinity(),
        }
    }

    fn equal(&self, other: &Self) -> bool {
        self == other
    }
}
