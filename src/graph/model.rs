//! Read-only graph model the analyzers traverse.
//!
//! Nodes and pins are stored in an arena owned by [`Graph`]; links between
//! pins are stored as (node id, pin id) pairs on both endpoints rather than
//! as references, so arbitrary cycles in the graph carry no lifetime or
//! ownership implications. The model is immutable once assembled - the
//! analyzers only ever read it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of a node a pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
}

/// What flows through a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinKind {
    /// Control-flow sequencing between nodes.
    Execution,
    /// A typed value.
    Data,
}

/// Closed structural category of a node.
///
/// The open `node_type` string identifies the node for whitelist matching;
/// this tag identifies the structural shape the exemption rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Event,
    CallFunction,
    VariableGet,
    VariableSet,
    Reroute,
    BreakStruct,
    CreateDelegate,
    SubsystemGet,
    SelfReference,
    MacroInstance,
    Other,
}

impl NodeCategory {
    /// Categories whose re-evaluation is free or meaningless: plain reads,
    /// pass-throughs, field extraction, delegate/subsystem handles.
    pub fn is_structurally_safe(&self) -> bool {
        matches!(
            self,
            NodeCategory::VariableGet
                | NodeCategory::Reroute
                | NodeCategory::BreakStruct
                | NodeCategory::CreateDelegate
                | NodeCategory::SubsystemGet
                | NodeCategory::SelfReference
        )
    }
}

impl Default for NodeCategory {
    fn default() -> Self {
        NodeCategory::Other
    }
}

/// Resolved metadata of a call-like node's target function.
///
/// Absence of a `CallTarget` on a call node means the target could not be
/// resolved when the asset was exported; the exemption rules treat that as
/// "cannot be proven safe".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallTarget {
    /// Target function name.
    pub function: String,
    /// Name of the type declaring the function, when known.
    #[serde(default)]
    pub owner_type: Option<String>,
    /// Target is declared const (no observable side effects).
    #[serde(default)]
    pub const_fn: bool,
    /// Target is a static/free function.
    #[serde(default)]
    pub static_fn: bool,
    /// Target carries native struct-break metadata.
    #[serde(default)]
    pub native_break: bool,
    /// Target carries native struct-make metadata.
    #[serde(default)]
    pub native_make: bool,
}

/// One endpoint of a link: the far pin, identified by ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRef {
    pub node: String,
    pub pin: String,
}

/// A connection point on a node.
///
/// Composite pins that have been split in the editor carry their element
/// pins in `sub_pins`; a link on a sub-pin is equivalent to a link on the
/// parent for every traversal in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub direction: PinDirection,
    pub kind: PinKind,
    /// Array/set/map-typed data pin.
    #[serde(default)]
    pub container: bool,
    /// Links are attached during asset assembly, never serialized.
    #[serde(skip)]
    pub links: Vec<PinRef>,
    #[serde(default)]
    pub sub_pins: Vec<Pin>,
}

impl Pin {
    /// Whether this pin (or any of its sub-pins) has at least one link.
    pub fn is_linked(&self) -> bool {
        !self.links.is_empty() || self.sub_pins.iter().any(Pin::is_linked)
    }

    /// All links of this pin with sub-pin links flattened in.
    pub fn all_links(&self) -> Vec<&PinRef> {
        let mut out = Vec::new();
        self.collect_links(&mut out);
        out
    }

    fn collect_links<'a>(&'a self, out: &mut Vec<&'a PinRef>) {
        out.extend(self.links.iter());
        for sub in &self.sub_pins {
            sub.collect_links(out);
        }
    }

    /// Find a pin by id in this pin's sub-pin tree, including itself.
    pub(crate) fn find(&self, id: &str) -> Option<&Pin> {
        if self.id == id {
            return Some(self);
        }
        self.sub_pins.iter().find_map(|sub| sub.find(id))
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Pin> {
        if self.id == id {
            return Some(self);
        }
        self.sub_pins.iter_mut().find_map(|sub| sub.find_mut(id))
    }
}

/// A node in a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity within the graph.
    pub id: String,
    /// Open type name, matched against the policy whitelist.
    pub node_type: String,
    /// Display title for messages; falls back to `id` when empty.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: NodeCategory,
    /// Evaluation has no side effects and is not sequenced by exec links.
    #[serde(default)]
    pub pure: bool,
    #[serde(default)]
    pub target: Option<CallTarget>,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Node {
    /// Display title, falling back to the node id.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Whether any execution input pin of this node is linked, i.e. the
    /// node is gated by control flow.
    pub fn has_linked_exec_input(&self) -> bool {
        self.pins
            .iter()
            .any(|p| p.direction == PinDirection::Input && p.kind == PinKind::Execution && p.is_linked())
    }

    /// Execution output pins.
    pub fn exec_output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|p| p.direction == PinDirection::Output && p.kind == PinKind::Execution)
    }

    /// Data output pins.
    pub fn data_output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins
            .iter()
            .filter(|p| p.direction == PinDirection::Output && p.kind == PinKind::Data)
    }

    /// Find a pin (or sub-pin) of this node by id.
    pub fn find_pin(&self, id: &str) -> Option<&Pin> {
        self.pins.iter().find_map(|p| p.find(id))
    }

    pub(crate) fn find_pin_mut(&mut self, id: &str) -> Option<&mut Pin> {
        self.pins.iter_mut().find_map(|p| p.find_mut(id))
    }
}

/// An ordered, id-indexed collection of nodes.
///
/// Node order is the asset's declaration order and drives the order in which
/// findings are reported, so two runs over the same asset produce identical
/// output.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Build a graph from assembled nodes. Later duplicates of an id are
    /// unreachable by lookup but keep their slot in iteration order.
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(slot);
        }
        Self {
            name: name.into(),
            nodes,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let slot = *self.index.get(id)?;
        Some(&mut self.nodes[slot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testutil::{conn, data_out, exec_in, graph, node};

    #[test]
    fn pin_links_flatten_sub_pins() {
        let mut parent = data_out("value");
        parent.links.push(PinRef {
            node: "a".into(),
            pin: "in".into(),
        });
        let mut sub = data_out("value_x");
        sub.links.push(PinRef {
            node: "b".into(),
            pin: "in".into(),
        });
        parent.sub_pins.push(sub);

        let links = parent.all_links();
        assert_eq!(links.len(), 2);
        assert!(parent.is_linked());
    }

    #[test]
    fn unlinked_pin_reports_unlinked() {
        let pin = data_out("value");
        assert!(!pin.is_linked());
        assert!(pin.all_links().is_empty());
    }

    #[test]
    fn graph_lookup_by_id() {
        let g = graph(
            "test",
            vec![
                node("a", "add", NodeCategory::CallFunction, true, vec![data_out("out")]),
                node("b", "print", NodeCategory::CallFunction, false, vec![exec_in("exec")]),
            ],
            &[],
        );

        assert_eq!(g.len(), 2);
        assert!(g.node("a").is_some());
        assert!(g.node("missing").is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let g = graph(
            "test",
            vec![
                node("a", "add", NodeCategory::CallFunction, true, vec![]),
                node("a", "multiply", NodeCategory::CallFunction, true, vec![]),
            ],
            &[],
        );

        assert_eq!(g.node("a").unwrap().node_type, "add");
        // Both keep their place in iteration order.
        assert_eq!(g.nodes().count(), 2);
    }

    #[test]
    fn exec_gating_detected_through_links() {
        let g = graph(
            "test",
            vec![
                node("ev", "begin_play", NodeCategory::Event, false, vec![crate::graph::testutil::exec_out("body")]),
                node("print", "print_string", NodeCategory::CallFunction, false, vec![exec_in("exec")]),
            ],
            &[conn("ev", "body", "print", "exec")],
        );

        assert!(g.node("print").unwrap().has_linked_exec_input());
        assert!(!g.node("ev").unwrap().has_linked_exec_input());
    }

    #[test]
    fn nodes_without_pins_are_valid() {
        let g = graph(
            "test",
            vec![node("bare", "comment", NodeCategory::Other, false, vec![])],
            &[],
        );
        let bare = g.node("bare").unwrap();
        assert!(!bare.has_linked_exec_input());
        assert_eq!(bare.data_output_pins().count(), 0);
    }
}
