//! Blueprint asset files and their conversion into the graph model.
//!
//! An asset is a JSON file (`*.blueprint.json`) holding the graphs of one
//! blueprint: event graphs first, then function graphs. Each graph is stored
//! as a node list plus a connection list; connections are resolved into
//! per-pin links at load time. Connections whose endpoints do not resolve
//! (unknown node or pin) are dropped rather than rejected - a half-broken
//! asset still gets the rest of its structure analyzed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{Graph, Node, PinRef};

/// Errors raised while loading an asset file.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A directed connection between two pins, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub source_node: String,
    pub source_pin: String,
    pub target_node: String,
    pub target_pin: String,
}

/// On-disk form of one graph: nodes plus connections.
#[derive(Debug, Deserialize)]
struct GraphFile {
    name: String,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    connections: Vec<Connection>,
}

/// On-disk form of one asset.
#[derive(Debug, Deserialize)]
struct AssetFile {
    name: String,
    #[serde(default)]
    event_graphs: Vec<GraphFile>,
    #[serde(default)]
    function_graphs: Vec<GraphFile>,
}

/// A loaded blueprint asset: the unit the validation driver works on.
#[derive(Debug, Clone)]
pub struct BlueprintAsset {
    pub name: String,
    /// Source file, when loaded from disk.
    pub path: Option<PathBuf>,
    pub event_graphs: Vec<Graph>,
    pub function_graphs: Vec<Graph>,
}

impl BlueprintAsset {
    /// Load an asset from a `*.blueprint.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut asset = Self::from_json(&content).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        asset.path = Some(path.to_path_buf());
        Ok(asset)
    }

    /// Parse an asset from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let file: AssetFile = serde_json::from_str(content)?;
        Ok(Self {
            name: file.name,
            path: None,
            event_graphs: file.event_graphs.into_iter().map(assemble).collect(),
            function_graphs: file.function_graphs.into_iter().map(assemble).collect(),
        })
    }

    /// All graphs of the asset, event graphs first.
    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.event_graphs.iter().chain(self.function_graphs.iter())
    }

    /// Display label for reports: the file path when known, else the name.
    pub fn label(&self) -> String {
        match &self.path {
            Some(p) => p.to_string_lossy().to_string(),
            None => self.name.clone(),
        }
    }
}

fn assemble(file: GraphFile) -> Graph {
    assemble_graph(file.name, file.nodes, &file.connections)
}

/// Wire connections into per-pin links and build the indexed graph.
///
/// A link is attached to both endpoints so traversal can follow it from
/// either side. Connections naming an unknown node or pin are skipped.
pub(crate) fn assemble_graph(
    name: impl Into<String>,
    nodes: Vec<Node>,
    connections: &[Connection],
) -> Graph {
    let mut graph = Graph::new(name, nodes);

    for conn in connections {
        let resolvable = endpoint_exists(&graph, &conn.source_node, &conn.source_pin)
            && endpoint_exists(&graph, &conn.target_node, &conn.target_pin);
        if !resolvable {
            continue;
        }
        attach(&mut graph, &conn.source_node, &conn.source_pin, &conn.target_node, &conn.target_pin);
        attach(&mut graph, &conn.target_node, &conn.target_pin, &conn.source_node, &conn.source_pin);
    }

    graph
}

fn endpoint_exists(graph: &Graph, node: &str, pin: &str) -> bool {
    graph.node(node).and_then(|n| n.find_pin(pin)).is_some()
}

fn attach(graph: &mut Graph, node: &str, pin: &str, far_node: &str, far_pin: &str) {
    if let Some(p) = graph.node_mut(node).and_then(|n| n.find_pin_mut(pin)) {
        p.links.push(PinRef {
            node: far_node.to_string(),
            pin: far_pin.to_string(),
        });
    }
}
