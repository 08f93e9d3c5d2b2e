//! Label Taxonomy
//!
//! The fixed set of semantic node kinds a parameter graph may contain, plus the
//! per-label metadata (settings key, expected value kind, scope) used when raw
//! settings are mapped into nodes. The taxonomy is built once and shared
//! read-only through the [`Catalog`](crate::catalog::Catalog).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic role of a parameter node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    // Project-wide options
    Package,
    ApplicationName,
    Dialect,
    StorageType,
    Cqrs,
    ProjectionType,
    Database,
    CommandModelDatabase,
    QueryModelDatabase,
    UseAnnotations,
    UseAutoDispatch,
    DesignerModelJson,
    Tag,
    CurrentDirectory,

    // Project coordinates and deployment
    GroupId,
    ArtifactId,
    ArtifactVersion,
    XoomVersion,
    MainClass,
    Deployment,
    DockerImage,
    KubernetesImage,
    KubernetesPodName,

    // Aggregates and their members
    Aggregate,
    StateField,
    FieldType,
    CollectionType,
    AggregateMethod,
    MethodParameter,
    CollectionMutation,
    FactoryMethod,
    DomainEvent,
    RouteSignature,
    RoutePath,
    RouteMethod,
    RequireEntityLoading,
    UriRoot,

    // Value objects
    ValueObject,
    ValueObjectField,
}

impl Label {
    /// Every label, in declaration order.
    pub const ALL: [Label; 39] = [
        Label::Package,
        Label::ApplicationName,
        Label::Dialect,
        Label::StorageType,
        Label::Cqrs,
        Label::ProjectionType,
        Label::Database,
        Label::CommandModelDatabase,
        Label::QueryModelDatabase,
        Label::UseAnnotations,
        Label::UseAutoDispatch,
        Label::DesignerModelJson,
        Label::Tag,
        Label::CurrentDirectory,
        Label::GroupId,
        Label::ArtifactId,
        Label::ArtifactVersion,
        Label::XoomVersion,
        Label::MainClass,
        Label::Deployment,
        Label::DockerImage,
        Label::KubernetesImage,
        Label::KubernetesPodName,
        Label::Aggregate,
        Label::StateField,
        Label::FieldType,
        Label::CollectionType,
        Label::AggregateMethod,
        Label::MethodParameter,
        Label::CollectionMutation,
        Label::FactoryMethod,
        Label::DomainEvent,
        Label::RouteSignature,
        Label::RoutePath,
        Label::RouteMethod,
        Label::RequireEntityLoading,
        Label::UriRoot,
        Label::ValueObject,
        Label::ValueObjectField,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Package => "PACKAGE",
            Label::ApplicationName => "APPLICATION_NAME",
            Label::Dialect => "DIALECT",
            Label::StorageType => "STORAGE_TYPE",
            Label::Cqrs => "CQRS",
            Label::ProjectionType => "PROJECTION_TYPE",
            Label::Database => "DATABASE",
            Label::CommandModelDatabase => "COMMAND_MODEL_DATABASE",
            Label::QueryModelDatabase => "QUERY_MODEL_DATABASE",
            Label::UseAnnotations => "USE_ANNOTATIONS",
            Label::UseAutoDispatch => "USE_AUTO_DISPATCH",
            Label::DesignerModelJson => "DESIGNER_MODEL_JSON",
            Label::Tag => "TAG",
            Label::CurrentDirectory => "CURRENT_DIRECTORY",
            Label::GroupId => "GROUP_ID",
            Label::ArtifactId => "ARTIFACT_ID",
            Label::ArtifactVersion => "ARTIFACT_VERSION",
            Label::XoomVersion => "XOOM_VERSION",
            Label::MainClass => "MAIN_CLASS",
            Label::Deployment => "DEPLOYMENT",
            Label::DockerImage => "DOCKER_IMAGE",
            Label::KubernetesImage => "KUBERNETES_IMAGE",
            Label::KubernetesPodName => "KUBERNETES_POD_NAME",
            Label::Aggregate => "AGGREGATE",
            Label::StateField => "STATE_FIELD",
            Label::FieldType => "FIELD_TYPE",
            Label::CollectionType => "COLLECTION_TYPE",
            Label::AggregateMethod => "AGGREGATE_METHOD",
            Label::MethodParameter => "METHOD_PARAMETER",
            Label::CollectionMutation => "COLLECTION_MUTATION",
            Label::FactoryMethod => "FACTORY_METHOD",
            Label::DomainEvent => "DOMAIN_EVENT",
            Label::RouteSignature => "ROUTE_SIGNATURE",
            Label::RoutePath => "ROUTE_PATH",
            Label::RouteMethod => "ROUTE_METHOD",
            Label::RequireEntityLoading => "REQUIRE_ENTITY_LOADING",
            Label::UriRoot => "URI_ROOT",
            Label::ValueObject => "VALUE_OBJECT",
            Label::ValueObjectField => "VALUE_OBJECT_FIELD",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of scalar a label's value is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Boolean,
    Enumerated,
    Numeric,
}

/// Where a label may appear in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScope {
    /// Root node, addressable through `nodes_of`/`node_of`
    Root,
    /// Only reachable as a relation of another node
    Related,
}

/// Metadata for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub label: Label,
    /// Key used in flat raw settings
    pub key: &'static str,
    pub value_kind: ValueKind,
    pub scope: LabelScope,
}

/// Immutable label registry
#[derive(Debug, Clone)]
pub struct LabelTaxonomy {
    specs: BTreeMap<Label, LabelSpec>,
    by_key: BTreeMap<&'static str, Label>,
}

impl LabelTaxonomy {
    /// The taxonomy shipped with the engine.
    pub fn standard() -> Self {
        use LabelScope::{Related, Root};
        use ValueKind::{Boolean, Enumerated, Text};

        let entries = [
            (Label::Package, "package", Text, Root),
            (Label::ApplicationName, "appName", Text, Root),
            (Label::Dialect, "dialect", Enumerated, Root),
            (Label::StorageType, "storageType", Enumerated, Root),
            (Label::Cqrs, "useCQRS", Boolean, Root),
            (Label::ProjectionType, "projectionType", Enumerated, Root),
            (Label::Database, "database", Enumerated, Root),
            (Label::CommandModelDatabase, "commandModelDatabase", Enumerated, Root),
            (Label::QueryModelDatabase, "queryModelDatabase", Enumerated, Root),
            (Label::UseAnnotations, "useAnnotations", Boolean, Root),
            (Label::UseAutoDispatch, "useAutoDispatch", Boolean, Root),
            (Label::DesignerModelJson, "designerModelJson", Text, Root),
            (Label::Tag, "tag", Text, Root),
            (Label::CurrentDirectory, "currentDirectory", Text, Root),
            (Label::GroupId, "groupId", Text, Root),
            (Label::ArtifactId, "artifactId", Text, Root),
            (Label::ArtifactVersion, "version", Text, Root),
            (Label::XoomVersion, "xoomVersion", Text, Root),
            (Label::MainClass, "mainClass", Text, Root),
            (Label::Deployment, "deployment", Enumerated, Root),
            (Label::DockerImage, "dockerImage", Text, Root),
            (Label::KubernetesImage, "kubernetesImage", Text, Root),
            (Label::KubernetesPodName, "kubernetesPodName", Text, Root),
            (Label::Aggregate, "aggregate", Text, Root),
            (Label::StateField, "stateField", Text, Related),
            (Label::FieldType, "fieldType", Text, Related),
            (Label::CollectionType, "collectionType", Text, Related),
            (Label::AggregateMethod, "aggregateMethod", Text, Related),
            (Label::MethodParameter, "methodParameter", Text, Related),
            (Label::CollectionMutation, "collectionMutation", Enumerated, Related),
            (Label::FactoryMethod, "factoryMethod", Boolean, Related),
            (Label::DomainEvent, "domainEvent", Text, Related),
            (Label::RouteSignature, "routeSignature", Text, Related),
            (Label::RoutePath, "routePath", Text, Related),
            (Label::RouteMethod, "routeMethod", Enumerated, Related),
            (Label::RequireEntityLoading, "requireEntityLoading", Boolean, Related),
            (Label::UriRoot, "uriRoot", Text, Related),
            (Label::ValueObject, "valueObject", Text, Root),
            (Label::ValueObjectField, "valueObjectField", Text, Related),
        ];

        let mut specs = BTreeMap::new();
        let mut by_key = BTreeMap::new();
        for (label, key, value_kind, scope) in entries {
            by_key.insert(key, label);
            specs.insert(
                label,
                LabelSpec {
                    label,
                    key,
                    value_kind,
                    scope,
                },
            );
        }
        Self { specs, by_key }
    }

    /// Metadata for a label. Every [`Label`] is registered in the standard taxonomy.
    pub fn spec(&self, label: Label) -> Option<&LabelSpec> {
        self.specs.get(&label)
    }

    /// Resolve a raw settings key to its label
    pub fn label_for_key(&self, key: &str) -> Option<Label> {
        self.by_key.get(key).copied()
    }

    pub fn is_root(&self, label: Label) -> bool {
        self.spec(label)
            .map(|spec| spec.scope == LabelScope::Root)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for LabelTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
