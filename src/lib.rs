//! # pushdown-base
//!
//! Core library for weighted pushdown system model checking: weighted
//! automata, pluggable semiring weight domains, and the pre\*/post\*
//! saturation procedures.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! domains   → Ready-made weight domains (reachability, gen/kill)
//!   ↓
//! wpds      → Rules, configurations, pre*/post* saturation
//!   ↓
//! wfa       → Weighted automata, path summary, intersection, prune
//!   ↓
//! semiring  → Weight-domain contract (zero/one/extend/combine/delta)
//!   ↓
//! base      → Primitives (Key interning, worklists)
//! ```
//!
//! A client interns its state and stack-symbol names into [`Key`]s, asserts
//! weighted rules on a [`Wpds`], describes the starting configurations as a
//! [`Wfa`], and runs [`Wpds::prestar`] or [`Wpds::poststar`]. The resulting
//! automaton answers weighted reachability queries, directly or through
//! [`Wfa::path_summary`].

// ============================================================================
// MODULES (dependency order: base → semiring → wfa → wpds → domains)
// ============================================================================

/// Foundation types: Key interning, worklists
pub mod base;

/// Weight-domain contract and the product weight
pub mod semiring;

/// Weighted finite automata over configurations
pub mod wfa;

/// Weighted pushdown systems and saturation
pub mod wpds;

/// Ready-made weight domains
pub mod domains;

/// Error types
pub mod error;

// Re-export foundation types
pub use base::{get_key, get_key_pair, key_str, FifoWorklist, Key, LifoWorklist, Worklist, EPSILON};
pub use error::{Result, WpdsError};
pub use semiring::{SemElemPair, Semiring};
pub use wfa::{KeepBoth, KeepLeft, KeepRight, Query, Wfa, WeightMaker};
pub use wpds::{Rule, RuleKind, Wpds, Wrapper};
