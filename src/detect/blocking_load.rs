//! Detection of synchronous asset loads inside graphs.
//!
//! A blocking load stalls the frame it runs on until the asset is resident.
//! The engine offers async counterparts for all of these; graphs should use
//! them.

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::graph::Graph;
use crate::policy::Policy;

use super::{AnalysisResult, Finding, FindingKind};

lazy_static! {
    /// Target function names known to load synchronously.
    static ref BLOCKING_LOAD_FUNCTIONS: HashSet<&'static str> = [
        "load_synchronous",
        "load_asset_blocking",
        "load_class_asset_blocking",
        "static_load_object",
        "static_load_class",
        "try_load",
    ]
    .into_iter()
    .collect();
}

/// Flag call nodes whose resolved target is a known blocking load.
///
/// Nodes without a resolved target produce nothing here - there is no name
/// to match against.
pub fn detect_blocking_load(graph: &Graph, policy: &Policy) -> AnalysisResult {
    let mut result = AnalysisResult::new();

    for node in graph.nodes() {
        let Some(target) = &node.target else { continue };
        let function = target.function.to_ascii_lowercase();
        if !BLOCKING_LOAD_FUNCTIONS.contains(function.as_str()) {
            continue;
        }

        result.add_finding(Finding {
            kind: FindingKind::BlockingLoad,
            message: format!(
                "'{}' calls blocking load '{}'; use the async counterpart instead",
                node.display_title(),
                target.function
            ),
            asset: String::new(),
            graph: graph.name().to_string(),
            node: node.id.clone(),
            title: node.display_title().to_string(),
            severity: policy.blocking_load.severity(),
        });
    }

    result
}
