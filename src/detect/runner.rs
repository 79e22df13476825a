//! Validation runner that orchestrates all checks over one asset.

use rayon::prelude::*;

use crate::graph::{BlueprintAsset, Graph};
use crate::policy::Policy;

use super::{detect_blocking_load, detect_empty_tick, detect_pure_multi, AnalysisResult};

/// Executes all enabled validators against an asset's graphs.
///
/// Graphs within one asset share nothing but the immutable policy, so they
/// are analyzed in parallel; results are merged back in graph order (event
/// graphs first, then function graphs) to keep output deterministic.
pub struct Runner {
    policy: Policy,
}

impl Runner {
    /// Create a new runner with the given policy.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Run all enabled validators over every graph of `asset`.
    pub fn run(&self, asset: &BlueprintAsset) -> AnalysisResult {
        let graphs: Vec<&Graph> = asset.graphs().collect();

        let per_graph: Vec<AnalysisResult> = graphs
            .par_iter()
            .map(|graph| self.run_graph(graph))
            .collect();

        let mut result = AnalysisResult::new();
        for graph_result in per_graph {
            result.merge(graph_result);
        }

        let label = asset.label();
        for finding in &mut result.findings {
            finding.asset = label.clone();
        }
        result.assets = 1;
        result
    }

    fn run_graph(&self, graph: &Graph) -> AnalysisResult {
        // The pure-node analysis always runs; its multi-exec half honors the
        // policy toggle internally while array-into-macro has none.
        let mut result = detect_pure_multi(graph, &self.policy);

        if self.policy.empty_tick.enabled {
            result.merge(detect_empty_tick(graph, &self.policy));
        }
        if self.policy.blocking_load.enabled {
            result.merge(detect_blocking_load(graph, &self.policy));
        }

        result.graphs = 1;
        result
    }
}
