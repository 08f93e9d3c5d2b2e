//! Query engine over a frozen parameter graph.
//!
//! Plural lookups never fail and preserve insertion order. Singular lookups are
//! a property of the call site: they fail with `NodeNotFound` on zero matches
//! and `AmbiguousNode` on more than one, even though the graph itself happily
//! stores duplicate labels.

use crate::error::QueryError;
use crate::graph::node::{NodeId, ParameterNode};
use crate::graph::value::{FromParameter, ParameterValue};
use crate::graph::ParameterGraph;
use crate::label::Label;
use std::borrow::Cow;
use std::fmt;

const ROOT_SCOPE: &str = "graph roots";

fn exactly_one(
    ids: &[NodeId],
    label: Label,
    scope: impl FnOnce() -> String,
) -> Result<NodeId, QueryError> {
    match ids {
        [id] => Ok(*id),
        [] => Err(QueryError::NodeNotFound {
            label,
            scope: scope(),
        }),
        many => Err(QueryError::AmbiguousNode {
            label,
            scope: scope(),
            count: many.len(),
        }),
    }
}

fn convert<T: FromParameter>(label: Label, value: &ParameterValue) -> Result<T, QueryError> {
    T::from_parameter(value).map_err(|reason| QueryError::ValueConversion {
        label,
        value: value.as_text().into_owned(),
        target: T::TARGET,
        reason,
    })
}

impl ParameterGraph {
    /// Borrow a node handle by id.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.len()).then_some(NodeRef { graph: self, id })
    }

    /// All root nodes carrying `label`, in insertion order.
    pub fn nodes_of(&self, label: Label) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.root_ids(label)
            .iter()
            .map(move |id| NodeRef { graph: self, id: *id })
    }

    /// The single root node carrying `label`.
    pub fn node_of(&self, label: Label) -> Result<NodeRef<'_>, QueryError> {
        let id = exactly_one(self.root_ids(label), label, || ROOT_SCOPE.to_string())?;
        Ok(NodeRef { graph: self, id })
    }

    pub fn has_node(&self, label: Label) -> bool {
        !self.root_ids(label).is_empty()
    }

    /// Text value of the single root node carrying `label`.
    pub fn value_of(&self, label: Label) -> Result<String, QueryError> {
        Ok(self.node_of(label)?.text().into_owned())
    }

    /// Like [`value_of`](Self::value_of) but tolerates absence.
    pub fn value_of_or(&self, label: Label, default: &str) -> Result<String, QueryError> {
        if self.has_node(label) {
            self.value_of(label)
        } else {
            Ok(default.to_string())
        }
    }

    /// Typed value of the single root node carrying `label`.
    pub fn value_as<T: FromParameter>(&self, label: Label) -> Result<T, QueryError> {
        convert(label, self.node_of(label)?.value())
    }

    /// Typed value with a fallback when no root carries `label`.
    pub fn value_as_or<T: FromParameter>(&self, label: Label, default: T) -> Result<T, QueryError> {
        if self.has_node(label) {
            self.value_as(label)
        } else {
            Ok(default)
        }
    }
}

/// Borrowed handle to one node of a frozen graph
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g ParameterGraph,
    id: NodeId,
}

impl<'g> NodeRef<'g> {
    fn raw(&self) -> &'g ParameterNode {
        self.graph.raw(self.id)
    }

    fn scope(&self) -> String {
        format!("{} '{}'", self.label(), self.text())
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> Label {
        self.raw().label()
    }

    pub fn value(&self) -> &'g ParameterValue {
        self.raw().value()
    }

    /// Textual value of this node.
    pub fn text(&self) -> Cow<'g, str> {
        self.value().as_text()
    }

    /// Children carrying `label`, in insertion order.
    pub fn related(&self, label: Label) -> impl Iterator<Item = NodeRef<'g>> + 'g {
        let graph = self.graph;
        self.raw()
            .children(label)
            .iter()
            .map(move |id| NodeRef { graph, id: *id })
    }

    /// The single child carrying `label`.
    pub fn one_related(&self, label: Label) -> Result<NodeRef<'g>, QueryError> {
        let id = exactly_one(self.raw().children(label), label, || self.scope())?;
        Ok(NodeRef {
            graph: self.graph,
            id,
        })
    }

    pub fn has_related(&self, label: Label) -> bool {
        !self.raw().children(label).is_empty()
    }

    pub fn count_related(&self, label: Label) -> usize {
        self.raw().children(label).len()
    }

    /// Text value of the single child carrying `label`.
    pub fn related_value(&self, label: Label) -> Result<String, QueryError> {
        Ok(self.one_related(label)?.text().into_owned())
    }

    /// Text value of the single child carrying `label`, or `default` when there
    /// is none. More than one child is still an error.
    pub fn related_value_or(&self, label: Label, default: &str) -> Result<String, QueryError> {
        if self.has_related(label) {
            self.related_value(label)
        } else {
            Ok(default.to_string())
        }
    }

    /// Typed value of the single child carrying `label`.
    pub fn related_value_as<T: FromParameter>(&self, label: Label) -> Result<T, QueryError> {
        convert(label, self.one_related(label)?.value())
    }

    /// Typed value with a fallback when no child carries `label`.
    pub fn related_value_as_or<T: FromParameter>(
        &self,
        label: Label,
        default: T,
    ) -> Result<T, QueryError> {
        if self.has_related(label) {
            self.related_value_as(label)
        } else {
            Ok(default)
        }
    }

    /// Apply an ad-hoc conversion to the single child carrying `label`.
    pub fn related_value_with<T, E, F>(
        &self,
        label: Label,
        target: &'static str,
        convert: F,
    ) -> Result<T, QueryError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        let raw = self.related_value(label)?;
        convert(&raw).map_err(|e| QueryError::ValueConversion {
            label,
            value: raw.clone(),
            target,
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &self.label())
            .field("value", self.value())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn author_graph() -> ParameterGraph {
        let mut builder = GraphBuilder::new();
        builder.root_node(Label::Package, "io.vlingo.xoomapp");
        builder.root_node(Label::Cqrs, true);
        let author = builder.root_node(Label::Aggregate, "Author");
        for (name, ty) in [("id", "String"), ("name", "Name"), ("rank", "Rank")] {
            let field = builder.relate_value(author, Label::StateField, name).unwrap();
            builder.relate_value(field, Label::FieldType, ty).unwrap();
        }
        let method = builder
            .relate_value(author, Label::AggregateMethod, "withName")
            .unwrap();
        builder
            .relate_value(method, Label::FactoryMethod, "true")
            .unwrap();
        builder.root_node(Label::Aggregate, "Book");
        builder.freeze()
    }

    #[test]
    fn plural_lookup_preserves_order_and_tolerates_absence() {
        let graph = author_graph();
        let names: Vec<_> = graph
            .nodes_of(Label::Aggregate)
            .map(|n| n.text().into_owned())
            .collect();
        assert_eq!(names, vec!["Author", "Book"]);
        assert_eq!(graph.nodes_of(Label::ValueObject).count(), 0);
    }

    #[test]
    fn singular_lookup_cardinality() {
        let graph = author_graph();
        assert_eq!(graph.value_of(Label::Package).unwrap(), "io.vlingo.xoomapp");
        assert!(matches!(
            graph.node_of(Label::Aggregate),
            Err(QueryError::AmbiguousNode { count: 2, .. })
        ));
        assert!(matches!(
            graph.node_of(Label::StorageType),
            Err(QueryError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn related_lookups() {
        let graph = author_graph();
        let author = graph.nodes_of(Label::Aggregate).next().unwrap();
        let fields: Vec<_> = author
            .related(Label::StateField)
            .map(|f| f.text().into_owned())
            .collect();
        assert_eq!(fields, vec!["id", "name", "rank"]);
        assert!(author.has_related(Label::AggregateMethod));
        assert!(!author.has_related(Label::DomainEvent));
        assert!(matches!(
            author.one_related(Label::StateField),
            Err(QueryError::AmbiguousNode { count: 3, .. })
        ));

        let method = author.one_related(Label::AggregateMethod).unwrap();
        assert!(method.related_value_as::<bool>(Label::FactoryMethod).unwrap());
        assert_eq!(method.related_value_or(Label::RoutePath, "/").unwrap(), "/");
    }

    #[test]
    fn conversion_failures_are_typed() {
        let graph = author_graph();
        let author = graph.nodes_of(Label::Aggregate).next().unwrap();
        let id = author.related(Label::StateField).next().unwrap();
        let err = id.related_value_as::<i64>(Label::FieldType).unwrap_err();
        assert!(matches!(
            err,
            QueryError::ValueConversion {
                label: Label::FieldType,
                target: "number",
                ..
            }
        ));

        let err = id
            .related_value_with(Label::FieldType, "length", |raw| {
                if raw.len() > 3 {
                    Err("too long")
                } else {
                    Ok(raw.len())
                }
            })
            .unwrap_err();
        assert!(matches!(err, QueryError::ValueConversion { target: "length", .. }));
    }

    #[test]
    fn typed_root_values() {
        let graph = author_graph();
        assert!(graph.value_as::<bool>(Label::Cqrs).unwrap());
        assert!(!graph.value_as_or(Label::UseAnnotations, false).unwrap());
        assert_eq!(graph.value_of_or(Label::Tag, "latest").unwrap(), "latest");
    }
}
