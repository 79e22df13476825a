//! Exemption rules for the pure-node analysis.
//!
//! Re-evaluating a pure node is only worth reporting when the evaluation can
//! be expensive or observable. Plain reads, pass-throughs and struct
//! extraction re-evaluate for free, and teams whitelist specific node types
//! or whole owning types they know to be safe. The rules here decide, once
//! per node per run, whether a node is excluded from the analysis.

use crate::graph::Node;
use crate::policy::Policy;

/// Whether `node` is exempt from the pure-node multi-evaluation analysis.
///
/// A node is exempt when any of the following holds:
/// - its type name is in the policy whitelist;
/// - its structural category is safe to re-evaluate (variable reads,
///   reroutes, struct breaks, delegate creation, subsystem accessors,
///   self references);
/// - its resolved call target is declared const or static;
/// - its resolved call target carries native break/make metadata;
/// - its resolved call target's owning type is in the harmless-owner set.
///
/// A call node with no resolved target is never exempt by the call-target
/// rules: an unknown target cannot be proven safe, so it stays in the
/// analysis rather than silently dropping out.
pub fn is_exempt(node: &Node, policy: &Policy) -> bool {
    if policy.is_whitelisted(&node.node_type) {
        return true;
    }

    if node.category.is_structurally_safe() {
        return true;
    }

    if let Some(target) = &node.target {
        if target.const_fn || target.static_fn {
            return true;
        }
        if target.native_break || target.native_make {
            return true;
        }
        if let Some(owner) = &target.owner_type {
            if policy.is_harmless_owner(owner) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testutil::{call_node, node, target};
    use crate::graph::NodeCategory;
    use crate::policy::Policy;

    fn policy_with_whitelist(entries: &[&str]) -> Policy {
        let mut policy = Policy::default();
        for e in entries {
            policy.whitelist.insert(e.to_string());
        }
        policy
    }

    fn policy_with_harmless(entries: &[&str]) -> Policy {
        let mut policy = Policy::default();
        for e in entries {
            policy.harmless_owners.insert(e.to_string());
        }
        policy
    }

    #[test]
    fn whitelisted_type_is_exempt() {
        let n = node("n", "get_game_mode", NodeCategory::CallFunction, true, vec![]);
        assert!(is_exempt(&n, &policy_with_whitelist(&["get_game_mode"])));
        assert!(!is_exempt(&n, &Policy::default()));
    }

    #[test]
    fn structurally_safe_categories_are_exempt() {
        for category in [
            NodeCategory::VariableGet,
            NodeCategory::Reroute,
            NodeCategory::BreakStruct,
            NodeCategory::CreateDelegate,
            NodeCategory::SubsystemGet,
            NodeCategory::SelfReference,
        ] {
            let n = node("n", "whatever", category, true, vec![]);
            assert!(is_exempt(&n, &Policy::default()), "{:?}", category);
        }

        let n = node("n", "whatever", NodeCategory::CallFunction, true, vec![]);
        assert!(!is_exempt(&n, &Policy::default()));
    }

    #[test]
    fn const_and_static_targets_are_exempt() {
        let mut t = target("get_length");
        t.const_fn = true;
        let n = call_node("n", "call", true, t, vec![]);
        assert!(is_exempt(&n, &Policy::default()));

        let mut t = target("clamp");
        t.static_fn = true;
        let n = call_node("n", "call", true, t, vec![]);
        assert!(is_exempt(&n, &Policy::default()));
    }

    #[test]
    fn native_break_make_metadata_is_exempt() {
        let mut t = target("break_hit_result");
        t.native_break = true;
        assert!(is_exempt(&call_node("n", "call", true, t, vec![]), &Policy::default()));

        let mut t = target("make_transform");
        t.native_make = true;
        assert!(is_exempt(&call_node("n", "call", true, t, vec![]), &Policy::default()));
    }

    #[test]
    fn harmless_owner_is_exempt() {
        let mut t = target("lerp");
        t.owner_type = Some("MathLibrary".to_string());
        let n = call_node("n", "call", true, t, vec![]);

        assert!(is_exempt(&n, &policy_with_harmless(&["MathLibrary"])));
        assert!(!is_exempt(&n, &Policy::default()));
    }

    #[test]
    fn unresolved_target_fails_open() {
        // A call node whose target could not be resolved must stay in the
        // analysis even when its owner would have been harmless.
        let n = node("n", "call_mystery", NodeCategory::CallFunction, true, vec![]);
        assert!(n.target.is_none());
        assert!(!is_exempt(&n, &policy_with_harmless(&["MathLibrary"])));
    }
}
