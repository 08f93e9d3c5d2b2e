//! Graph builder for constructing parameter graphs
//!
//! Construction is append-only: nodes are created, relations attached and roots
//! registered, then [`GraphBuilder::freeze`] hands out the immutable
//! [`ParameterGraph`]. The frozen graph exposes no mutation at all, so nothing
//! can change it once a step starts reading.

use crate::error::GraphError;
use crate::graph::node::{NodeId, ParameterNode};
use crate::graph::value::ParameterValue;
use crate::graph::ParameterGraph;
use crate::label::Label;
use std::collections::BTreeMap;
use tracing::debug;

/// Mutable construction phase of a parameter graph
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: Vec<ParameterNode>,
    roots: BTreeMap<Label, Vec<NodeId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node. It becomes reachable once related or rooted.
    pub fn node(&mut self, label: Label, value: impl Into<ParameterValue>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParameterNode::new(label, value.into()));
        id
    }

    /// Create a node and register it as a root in one call.
    pub fn root_node(&mut self, label: Label, value: impl Into<ParameterValue>) -> NodeId {
        let id = self.node(label, value);
        self.roots.entry(label).or_default().push(id);
        id
    }

    /// Register an existing node as a root under its own label.
    ///
    /// Registering the same node twice is a no-op.
    pub fn root(&mut self, id: NodeId) -> Result<(), GraphError> {
        let label = self.label_of(id)?;
        let roots = self.roots.entry(label).or_default();
        if !roots.contains(&id) {
            roots.push(id);
        }
        Ok(())
    }

    /// Attach `child` to `parent` under the child's label.
    ///
    /// The child keeps its own identity; attaching it to another parent shares it.
    pub fn relate(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        if parent == child {
            return Err(GraphError::SelfRelation(parent));
        }
        let label = self.label_of(child)?;
        let node = self
            .nodes
            .get_mut(parent.0)
            .ok_or(GraphError::UnknownNode(parent))?;
        node.append(label, child);
        Ok(())
    }

    /// Create a leaf node and attach it to `parent`.
    pub fn relate_value(
        &mut self,
        parent: NodeId,
        label: Label,
        value: impl Into<ParameterValue>,
    ) -> Result<NodeId, GraphError> {
        if parent.0 >= self.nodes.len() {
            return Err(GraphError::UnknownNode(parent));
        }
        let child = self.node(label, value);
        self.relate(parent, child)?;
        Ok(child)
    }

    pub fn label_of(&self, id: NodeId) -> Result<Label, GraphError> {
        self.nodes
            .get(id.0)
            .map(ParameterNode::label)
            .ok_or(GraphError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// End construction and return the read-only graph.
    pub fn freeze(self) -> ParameterGraph {
        debug!(
            node_count = self.nodes.len(),
            root_labels = self.roots.len(),
            "Parameter graph frozen"
        );
        ParameterGraph::from_parts(self.nodes, self.roots)
    }
}
