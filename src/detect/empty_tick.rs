//! Detection of tick events that drive nothing.
//!
//! A tick event node makes the host engine call into the graph every frame.
//! When its execution output is wired to nothing, that per-frame cost buys a
//! no-op; the event should be removed or disabled on the asset.

use crate::graph::{Graph, Node, NodeCategory};
use crate::policy::Policy;

use super::{AnalysisResult, Finding, FindingKind};

/// Node type names that identify a tick event, compared case-insensitively.
const TICK_EVENTS: &[&str] = &["receive_tick", "event_tick", "tick"];

fn is_tick_event(node: &Node) -> bool {
    node.category == NodeCategory::Event
        && TICK_EVENTS.contains(&node.node_type.to_ascii_lowercase().as_str())
}

/// Flag tick event nodes with no linked execution output.
pub fn detect_empty_tick(graph: &Graph, policy: &Policy) -> AnalysisResult {
    let mut result = AnalysisResult::new();

    for node in graph.nodes() {
        if !is_tick_event(node) {
            continue;
        }
        if node.exec_output_pins().any(|p| p.is_linked()) {
            continue;
        }

        result.add_finding(Finding {
            kind: FindingKind::EmptyTick,
            message: format!(
                "tick event '{}' is enabled but its execution output drives nothing",
                node.display_title()
            ),
            asset: String::new(),
            graph: graph.name().to_string(),
            node: node.id.clone(),
            title: node.display_title().to_string(),
            severity: policy.empty_tick.severity(),
        });
    }

    result
}
