//! Data-flow consumer discovery for pure nodes.
//!
//! A pure node's value is recomputed at the point where control flow reaches
//! its consumer, so the interesting question is not "who reads this value"
//! but "where does evaluation actually get scheduled". [`first_impure_sink`]
//! answers that: the first node downstream of a consumer, following data
//! links, that has a connected execution input.

use std::collections::{HashSet, VecDeque};

use crate::graph::{Graph, Node};

/// Owning nodes of every pin linked to `node`'s data outputs, sub-pin links
/// included. Duplicates collapse; first-seen order is preserved so callers
/// iterate deterministically.
pub fn data_consumers<'g>(graph: &'g Graph, node: &Node) -> Vec<&'g Node> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut consumers = Vec::new();

    for pin in node.data_output_pins() {
        for link in pin.all_links() {
            if let Some(consumer) = graph.node(&link.node) {
                if seen.insert(consumer.id.as_str()) {
                    consumers.push(consumer);
                }
            }
        }
    }

    consumers
}

/// Walk forward from `start` through data links until the first node with a
/// linked execution input pin - the node whose scheduling triggers the
/// evaluation. Returns `None` when the value is consumed only by further
/// pure computation (no scheduling point, so no multi-fire through this
/// path). Cycle-safe.
pub fn first_impure_sink<'g>(graph: &'g Graph, start: &'g Node) -> Option<&'g Node> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&Node> = VecDeque::new();

    visited.insert(start.id.as_str());
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        if node.has_linked_exec_input() {
            // The sink itself is not expanded further.
            return Some(node);
        }
        for pin in node.data_output_pins() {
            for link in pin.all_links() {
                if let Some(next) = graph.node(&link.node) {
                    if visited.insert(next.id.as_str()) {
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    None
}
