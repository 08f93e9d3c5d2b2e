//! Parameter nodes stored in the graph arena.

use crate::graph::value::ParameterValue;
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable index of a node inside one graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One labeled node with its ordered relations
///
/// Relations form an ordered multimap: per child label, children keep the order
/// they were attached in. Children are arena references, so the same node may
/// be related from several parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNode {
    label: Label,
    value: ParameterValue,
    relations: BTreeMap<Label, Vec<NodeId>>,
}

impl ParameterNode {
    pub(crate) fn new(label: Label, value: ParameterValue) -> Self {
        Self {
            label,
            value,
            relations: BTreeMap::new(),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    /// Children carrying `label`, in attachment order.
    pub fn children(&self, label: Label) -> &[NodeId] {
        self.relations
            .get(&label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Labels this node has at least one relation for.
    pub fn relation_labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.relations.keys().copied()
    }

    pub(crate) fn append(&mut self, label: Label, child: NodeId) {
        self.relations.entry(label).or_default().push(child);
    }
}
