//! Graph assets and the read-only model the analyzers traverse.

mod asset;
mod model;

#[cfg(test)]
pub(crate) mod testutil;

pub use asset::{AssetError, BlueprintAsset, Connection};
pub use model::{CallTarget, Graph, Node, NodeCategory, Pin, PinDirection, PinKind, PinRef};
