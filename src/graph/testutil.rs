//! Shared helpers for building graphs in unit tests.

use super::asset::{assemble_graph, Connection};
use super::model::{CallTarget, Graph, Node, NodeCategory, Pin, PinDirection, PinKind};

pub(crate) fn pin(id: &str, direction: PinDirection, kind: PinKind) -> Pin {
    Pin {
        id: id.to_string(),
        name: id.to_string(),
        direction,
        kind,
        container: false,
        links: Vec::new(),
        sub_pins: Vec::new(),
    }
}

pub(crate) fn exec_in(id: &str) -> Pin {
    pin(id, PinDirection::Input, PinKind::Execution)
}

pub(crate) fn exec_out(id: &str) -> Pin {
    pin(id, PinDirection::Output, PinKind::Execution)
}

pub(crate) fn data_in(id: &str) -> Pin {
    pin(id, PinDirection::Input, PinKind::Data)
}

pub(crate) fn data_out(id: &str) -> Pin {
    pin(id, PinDirection::Output, PinKind::Data)
}

pub(crate) fn data_out_container(id: &str) -> Pin {
    let mut p = data_out(id);
    p.container = true;
    p
}

pub(crate) fn node(
    id: &str,
    node_type: &str,
    category: NodeCategory,
    pure: bool,
    pins: Vec<Pin>,
) -> Node {
    Node {
        id: id.to_string(),
        node_type: node_type.to_string(),
        title: String::new(),
        category,
        pure,
        target: None,
        pins,
    }
}

pub(crate) fn call_node(id: &str, node_type: &str, pure: bool, target: CallTarget, pins: Vec<Pin>) -> Node {
    let mut n = node(id, node_type, NodeCategory::CallFunction, pure, pins);
    n.target = Some(target);
    n
}

pub(crate) fn target(function: &str) -> CallTarget {
    CallTarget {
        function: function.to_string(),
        owner_type: None,
        const_fn: false,
        static_fn: false,
        native_break: false,
        native_make: false,
    }
}

pub(crate) fn conn(source_node: &str, source_pin: &str, target_node: &str, target_pin: &str) -> Connection {
    Connection {
        source_node: source_node.to_string(),
        source_pin: source_pin.to_string(),
        target_node: target_node.to_string(),
        target_pin: target_pin.to_string(),
    }
}

pub(crate) fn graph(name: &str, nodes: Vec<Node>, connections: &[Connection]) -> Graph {
    assemble_graph(name, nodes, connections)
}
