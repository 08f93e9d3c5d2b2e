//! Code generation: resolvers that turn graph fragments into template data,
//! and the steps that drive them.

pub mod aggregate;
pub mod data_object;
pub mod designer_model;
pub mod formatting;
pub mod kinds;
pub mod projection;
pub mod steps;
pub mod storage;
pub mod store_provider;
pub mod value_object;

use crate::error::QueryError;
use crate::graph::ParameterGraph;
use crate::label::Label;
use kinds::{Dialect, ProjectionType, StorageType};

/// Project-wide options every resolver reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub package: String,
    pub app_name: Option<String>,
    pub dialect: Dialect,
    pub storage: StorageType,
    pub cqrs: bool,
    pub projection: ProjectionType,
    pub use_annotations: bool,
    pub use_auto_dispatch: bool,
}

impl ProjectOptions {
    /// Read the global options. The package is required; the rest default to
    /// Java, state store, no CQRS, no projections and no annotations.
    pub fn from_graph(graph: &ParameterGraph) -> Result<Self, QueryError> {
        let app_name = if graph.has_node(Label::ApplicationName) {
            Some(graph.value_of(Label::ApplicationName)?)
        } else {
            None
        };
        Ok(Self {
            package: graph.value_of(Label::Package)?,
            app_name,
            dialect: graph.value_as_or(Label::Dialect, Dialect::Java)?,
            storage: graph.value_as_or(Label::StorageType, StorageType::StateStore)?,
            cqrs: graph.value_as_or(Label::Cqrs, false)?,
            projection: graph.value_as_or(Label::ProjectionType, ProjectionType::None)?,
            use_annotations: graph.value_as_or(Label::UseAnnotations, false)?,
            use_auto_dispatch: graph.value_as_or(Label::UseAutoDispatch, false)?,
        })
    }

    /// Application name, falling back to the last package segment.
    pub fn application_name(&self) -> &str {
        match &self.app_name {
            Some(name) => name,
            None => self.package.rsplit('.').next().unwrap_or(&self.package),
        }
    }
}
