//! Purecheck - blueprint graph quality gate.
//!
//! Purecheck statically analyzes visual-scripting graph assets (node/pin
//! graphs representing executable logic) and reports pure computation nodes
//! whose output is evaluated more than once at runtime. Pure nodes are
//! recomputed per consumption site rather than cached, so wiring one pure
//! output into several independently executed consumers silently duplicates
//! side effects or work - a bug the graph's visual layout gives no hint of.
//!
//! # Architecture
//!
//! - `graph`: asset files and the read-only node/pin model
//! - `analyze`: the two traversals the core check is built on - execution
//!   reachability and data-flow consumer discovery
//! - `detect`: validators that turn graphs into findings, and the runner
//!   that orchestrates them per asset
//! - `policy`: YAML policy schema (whitelists, toggles)
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Validator
//!
//! See `src/detect/empty_tick.rs` for the smallest example. Write a
//! `detect_*` function over one graph, give it a toggle in `policy`, and
//! wire it into `detect::Runner::run_graph`.

pub mod analyze;
pub mod cli;
pub mod detect;
pub mod graph;
pub mod policy;
pub mod report;

pub use analyze::{data_consumers, first_impure_sink, reachable_nodes};
pub use detect::{AnalysisResult, Finding, FindingKind, Runner, Severity};
pub use graph::{BlueprintAsset, CallTarget, Graph, Node, NodeCategory, Pin, PinDirection, PinKind};
pub use policy::Policy;
