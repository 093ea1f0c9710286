//! The contract between a normalization policy and the document tree.

use crate::error::RuleError;
use crate::node::Node;

/// A normalization policy.
///
/// A rule names the path expressions it wants evaluated and rewrites each
/// matched node. The normalizer resolves [`Rule::paths`] in order and calls
/// [`Rule::apply`] once per match, against the live tree: a rule sees the
/// values left by every rule before it.
///
/// Implementations must treat their own state as read-only while applying,
/// must not panic on unexpected node types, and report failures through
/// [`RuleError`] (use [`RuleError::Custom`] for policy-specific errors).
pub trait Rule: Send + Sync {
    /// Path expressions to resolve, in application order.
    fn paths(&self) -> &[String];

    /// Rewrite one matched node.
    fn apply(&self, node: &mut dyn Node) -> Result<(), RuleError>;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn paths(&self) -> &[String] {
        (**self).paths()
    }

    fn apply(&self, node: &mut dyn Node) -> Result<(), RuleError> {
        (**self).apply(node)
    }
}
