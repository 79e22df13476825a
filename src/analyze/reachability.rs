//! Execution reachability over a single graph.
//!
//! Entry points are nodes nothing can gate: no linked execution input pin.
//! That set includes genuine entries (events) and exec-orphans; both are
//! seeded as reachable, since a node the exec graph never gates must not be
//! ruled out of the analysis.

use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;

/// Compute the set of nodes reachable through execution links, starting
/// from every entry point. Cycle-safe; each node is visited at most once.
pub fn reachable_nodes(graph: &Graph) -> HashSet<&str> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for node in graph.nodes() {
        if !node.has_linked_exec_input() && visited.insert(node.id.as_str()) {
            queue.push_back(&node.id);
        }
    }

    while let Some(id) = queue.pop_front() {
        let Some(node) = graph.node(id) else { continue };
        for pin in node.exec_output_pins() {
            for link in pin.all_links() {
                // Links into nodes outside the graph are skipped.
                if let Some(next) = graph.node(&link.node) {
                    if visited.insert(next.id.as_str()) {
                        queue.push_back(&next.id);
                    }
                }
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testutil::{conn, exec_in, exec_out, graph, node};
    use crate::graph::NodeCategory;

    fn exec_node(id: &str) -> crate::graph::Node {
        node(
            id,
            "step",
            NodeCategory::CallFunction,
            false,
            vec![exec_in("exec"), exec_out("then")],
        )
    }

    #[test]
    fn chain_from_entry_is_reachable() {
        let g = graph(
            "test",
            vec![
                node("ev", "begin_play", NodeCategory::Event, false, vec![exec_out("body")]),
                exec_node("a"),
                exec_node("b"),
            ],
            &[conn("ev", "body", "a", "exec"), conn("a", "then", "b", "exec")],
        );

        let reachable = reachable_nodes(&g);
        assert_eq!(reachable.len(), 3);
        assert!(reachable.contains("ev"));
        assert!(reachable.contains("a"));
        assert!(reachable.contains("b"));
    }

    #[test]
    fn exec_orphan_seeds_its_successors() {
        // Nothing links into b's exec input, so b is an entry seed and c is
        // reachable through it even though no event feeds either.
        let g = graph(
            "test",
            vec![
                node("ev", "begin_play", NodeCategory::Event, false, vec![exec_out("body")]),
                exec_node("a"),
                exec_node("b"),
                exec_node("c"),
            ],
            &[
                conn("ev", "body", "a", "exec"),
                conn("b", "then", "c", "exec"),
            ],
        );

        let reachable = reachable_nodes(&g);
        assert!(reachable.contains("b"), "exec-orphan is an entry seed");
        assert!(reachable.contains("c"));
        assert_eq!(reachable.len(), 4);
    }

    #[test]
    fn exec_cycle_terminates_with_both_nodes() {
        let g = graph(
            "test",
            vec![exec_node("a"), exec_node("b")],
            &[conn("a", "then", "b", "exec"), conn("b", "then", "a", "exec")],
        );

        // Both nodes have linked exec inputs, so neither is an entry; the
        // cycle alone makes nothing reachable.
        let reachable = reachable_nodes(&g);
        assert!(reachable.is_empty());
    }

    #[test]
    fn exec_cycle_fed_from_entry_is_fully_visited() {
        let g = graph(
            "test",
            vec![
                node("ev", "begin_play", NodeCategory::Event, false, vec![exec_out("body")]),
                exec_node("a"),
                exec_node("b"),
            ],
            &[
                conn("ev", "body", "a", "exec"),
                conn("a", "then", "b", "exec"),
                conn("b", "then", "a", "exec"),
            ],
        );

        let reachable = reachable_nodes(&g);
        assert_eq!(reachable.len(), 3);
    }

    #[test]
    fn disconnected_node_is_its_own_entry() {
        let g = graph(
            "test",
            vec![node("island", "comment", NodeCategory::Other, false, vec![])],
            &[],
        );

        assert!(reachable_nodes(&g).contains("island"));
    }

    #[test]
    fn empty_graph_yields_empty_set() {
        let g = graph("test", vec![], &[]);
        assert!(reachable_nodes(&g).is_empty());
    }
}
