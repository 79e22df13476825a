//! Validators that turn graphs into findings.

mod blocking_load;
mod empty_tick;
mod exempt;
mod pure_multi;
mod runner;
mod types;

pub use blocking_load::detect_blocking_load;
pub use empty_tick::detect_empty_tick;
pub use exempt::is_exempt;
pub use pure_multi::detect_pure_multi;
pub use runner::Runner;
pub use types::{AnalysisResult, Finding, FindingKind, Severity};
