//! Detection of pure nodes that evaluate more than once.
//!
//! A pure node has no execution pins, so the runtime recomputes its value at
//! every point where a consumer is scheduled instead of caching it. Wiring
//! one pure output into two independently executed consumers therefore runs
//! the computation twice - duplicate side effects or wasted work that the
//! graph's visual layout gives no hint of.
//!
//! Two failure modes are reported:
//!
//! - **array_into_macro**: a container-typed output wired into a
//!   macro-expansion input. Macros expand per element at instantiation time,
//!   so the pure computation is guaranteed to run once per element. This is
//!   definitive and always an error.
//! - **multi_exec**: the node's data reaches two or more distinct impure
//!   sinks that control flow can actually arrive at. Each sink schedules its
//!   own evaluation.

use std::collections::HashSet;

use crate::analyze::{data_consumers, first_impure_sink, reachable_nodes};
use crate::graph::{Graph, Node, NodeCategory, PinDirection};
use crate::policy::Policy;

use super::exempt::is_exempt;
use super::{AnalysisResult, Finding, FindingKind, Severity};

/// Run the pure-node analysis over one graph.
///
/// Findings come out in the graph's node order. The array-into-macro check
/// runs even when the multi-exec check is disabled by policy; when both
/// would fire for one node, array-into-macro wins and multi-exec is skipped
/// for that node.
pub fn detect_pure_multi(graph: &Graph, policy: &Policy) -> AnalysisResult {
    let mut result = AnalysisResult::new();

    // Computed once per graph, shared by every candidate node. Skipped
    // entirely when the multi-exec check is off.
    let reachable = if policy.multi_exec.enabled {
        Some(reachable_nodes(graph))
    } else {
        None
    };

    for node in graph.nodes() {
        if !node.pure || is_exempt(node, policy) {
            continue;
        }

        if container_output_feeds_macro(graph, node) {
            result.add_finding(Finding {
                kind: FindingKind::ArrayIntoMacro,
                message: format!(
                    "container output of pure node '{}' is wired into a macro input; \
                     the node re-evaluates once per expanded element",
                    node.display_title()
                ),
                asset: String::new(),
                graph: graph.name().to_string(),
                node: node.id.clone(),
                title: node.display_title().to_string(),
                severity: Severity::Error,
            });
            continue;
        }

        let Some(reachable) = &reachable else { continue };

        let mut sinks: HashSet<&str> = HashSet::new();
        for consumer in data_consumers(graph, node) {
            if let Some(sink) = first_impure_sink(graph, consumer) {
                if reachable.contains(sink.id.as_str()) {
                    sinks.insert(sink.id.as_str());
                }
            }
        }

        if sinks.len() > 1 {
            result.add_finding(Finding {
                kind: FindingKind::MultiExec,
                message: format!(
                    "pure node '{}' feeds {} separately executed consumers; \
                     its computation runs once per execution path",
                    node.display_title(),
                    sinks.len()
                ),
                asset: String::new(),
                graph: graph.name().to_string(),
                node: node.id.clone(),
                title: node.display_title().to_string(),
                severity: policy.multi_exec.severity(),
            });
        }
    }

    result
}

/// Whether any container-typed output pin of `node` links into a
/// macro-instance node.
fn container_output_feeds_macro(graph: &Graph, node: &Node) -> bool {
    node.pins
        .iter()
        .filter(|p| p.direction == PinDirection::Output && p.container)
        .any(|pin| {
            pin.all_links().iter().any(|link| {
                graph
                    .node(&link.node)
                    .map_or(false, |n| n.category == NodeCategory::MacroInstance)
            })
        })
}
