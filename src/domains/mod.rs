//! Ready-made weight domains.
//!
//! These are ordinary clients of [`Semiring`](crate::semiring::Semiring) —
//! the engines never name them — but every analysis needs at least one, and
//! the test suites lean on them:
//! - [`Reach`] - two-point reachability
//! - [`GenKill`] - gen/kill dataflow transformers over a pluggable set type

mod genkill;
mod reach;

pub use genkill::{vars, GenKill, KillGenSet, VarSet};
pub use reach::Reach;
