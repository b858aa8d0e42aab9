//! Foundation types for the pushdown toolchain.
//!
//! This module provides the primitives used everywhere else:
//! - [`Key`], [`EPSILON`] - Interned identifiers for states and stack symbols
//! - [`KeySpace`], [`get_key`], [`get_key_pair`], [`key_str`] - Key interning
//! - [`Worklist`], [`FifoWorklist`], [`LifoWorklist`] - Fixpoint worklists
//!
//! This module has NO dependencies on other modules of this crate.

mod intern;
mod key;
mod worklist;

pub use intern::{get_key, get_key_pair, key_str, KeySpace};
pub use key::{Key, EPSILON};
pub use worklist::{FifoWorklist, LifoWorklist, Worklist};
