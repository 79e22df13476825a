//! Graph traversals the detectors are built on.
//!
//! Two intertwined walks over one graph:
//!
//! - `reachability`: which nodes control flow can actually arrive at,
//!   starting from every entry point.
//! - `consumers`: which nodes consume a pure node's data, and where along
//!   each consumption path evaluation first gets scheduled.
//!
//! Both are cycle-safe, never mutate the graph, and never cross graph
//! boundaries.

mod consumers;
mod reachability;

pub use consumers::{data_consumers, first_impure_sink};
pub use reachability::reachable_nodes;
