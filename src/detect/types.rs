//! Core types for analysis results.

use serde::{Deserialize, Serialize};

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// The kinds of findings the validators produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    /// A pure node whose data reaches more than one reachable impure sink.
    #[serde(rename = "multi_exec")]
    MultiExec,
    /// A pure node's container output wired into a macro-expansion input.
    #[serde(rename = "array_into_macro")]
    ArrayIntoMacro,
    /// A tick event whose execution output drives nothing.
    #[serde(rename = "empty_tick")]
    EmptyTick,
    /// A call node targeting a synchronous asset-load function.
    #[serde(rename = "blocking_load")]
    BlockingLoad,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::MultiExec => "multi_exec",
            FindingKind::ArrayIntoMacro => "array_into_macro",
            FindingKind::EmptyTick => "empty_tick",
            FindingKind::BlockingLoad => "blocking_load",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "multi_exec" => Some(FindingKind::MultiExec),
            "array_into_macro" => Some(FindingKind::ArrayIntoMacro),
            "empty_tick" => Some(FindingKind::EmptyTick),
            "blocking_load" => Some(FindingKind::BlockingLoad),
            _ => None,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue, carrying enough identity for an external
/// reporting layer to locate and focus the offending node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
    /// Asset label, stamped by the runner.
    #[serde(default)]
    pub asset: String,
    /// Name of the graph the node lives in.
    pub graph: String,
    /// Node id within the graph.
    pub node: String,
    /// Display title of the node.
    pub title: String,
    pub severity: Severity,
}

impl Finding {
    /// Create a unique key for this finding (for deduplication/comparison).
    pub fn key(&self) -> String {
        format!("{}|{}|{}|{}", self.kind, self.asset, self.graph, self.node)
    }
}

/// Results of running the validators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    /// Number of graphs analyzed.
    pub graphs: usize,
    /// Number of assets analyzed.
    pub assets: usize,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: AnalysisResult) {
        self.findings.extend(other.findings);
        self.graphs += other.graphs;
        self.assets += other.assets;
    }

    /// Add a finding to the result.
    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Check if there are any error-severity findings.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Number of findings with the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}
