//! Parameter Graph
//!
//! Holds one generation request's model as a labeled directed graph. Nodes live
//! in an arena owned by the graph and relations are [`NodeId`] references, so a
//! node shared by several parents (a value object used by many aggregates)
//! still has exactly one owner.

pub mod builder;
pub mod node;
pub mod query;
pub mod value;

pub use builder::GraphBuilder;
pub use node::{NodeId, ParameterNode};
pub use query::NodeRef;
pub use value::{parse_enumerated, FromParameter, ParameterValue};

use crate::label::Label;
use std::collections::BTreeMap;

/// Frozen parameter graph
///
/// Only obtainable through [`GraphBuilder::freeze`]. All access is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGraph {
    nodes: Vec<ParameterNode>,
    roots: BTreeMap<Label, Vec<NodeId>>,
}

impl ParameterGraph {
    pub(crate) fn from_parts(nodes: Vec<ParameterNode>, roots: BTreeMap<Label, Vec<NodeId>>) -> Self {
        Self { nodes, roots }
    }

    /// A graph with no nodes, for pipelines that only read properties.
    pub fn empty() -> Self {
        GraphBuilder::new().freeze()
    }

    pub(crate) fn raw(&self, id: NodeId) -> &ParameterNode {
        &self.nodes[id.0]
    }

    pub(crate) fn root_ids(&self, label: Label) -> &[NodeId] {
        self.roots.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of nodes in the arena, rooted or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Labels that have at least one root node.
    pub fn root_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.roots
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(label, _)| *label)
    }
}
