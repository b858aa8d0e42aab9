//! Weight rewriting hook for witness-style clients.

use crate::base::Key;
use crate::wpds::rule::Rule;

/// Rewrites weights as they enter a pushdown system.
///
/// When installed, every added rule's weight is replaced by
/// [`wrap_rule`](Wrapper::wrap_rule) and every transition copied from a
/// saturation input by [`wrap_trans`](Wrapper::wrap_trans). Clients use this
/// to thread witness or trace structure through a run without the engine
/// knowing; the wrapping must be injective with respect to the underlying
/// weight or saturation results lose meaning.
pub trait Wrapper<W> {
    fn wrap_rule(&self, rule: &Rule<W>) -> W;

    fn wrap_trans(&self, from: Key, stack: Key, to: Key, weight: &W) -> W;
}
