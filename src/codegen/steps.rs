//! Project generation steps.
//!
//! Each factory resolves one family of artifacts; wrapped in a
//! [`TemplateProcessingStep`](crate::template::TemplateProcessingStep) it
//! renders them and registers the content. Order matters: later factories
//! look up packages and class names of content produced earlier.

use crate::codegen::kinds::ProjectionType;
use crate::codegen::{
    aggregate, data_object, designer_model, entity_unit_test, projection, rest_resource_test,
    store_provider, value_object, ProjectOptions,
};
use crate::context::{ExecutionContext, Output};
use crate::error::StepError;
use crate::label::Label;
use crate::pipeline::Step;
use crate::template::{TemplateData, TemplateDataFactory};
use serde::Serialize;
use tracing::info;

pub struct ValueObjectGeneration;

impl TemplateDataFactory for ValueObjectGeneration {
    fn name(&self) -> &'static str {
        "value_object_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::ValueObject)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let resolved = context
            .graph()
            .nodes_of(Label::ValueObject)
            .map(|vo| value_object::resolve(&options, vo))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(resolved)
    }
}

/// Aggregate states with their methods, plus state adapters where the
/// storage kind needs them
pub struct ModelGeneration;

impl TemplateDataFactory for ModelGeneration {
    fn name(&self) -> &'static str {
        "model_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::Aggregate)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let mut resolved = Vec::new();
        for aggregate in context.graph().nodes_of(Label::Aggregate) {
            resolved.push(aggregate::resolve_state(&options, aggregate, context.contents())?);
            resolved.extend(aggregate::resolve_adapter(&options, aggregate));
        }
        Ok(resolved)
    }
}

pub struct DataObjectGeneration;

impl TemplateDataFactory for DataObjectGeneration {
    fn name(&self) -> &'static str {
        "data_object_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::Aggregate) || context.graph().has_node(Label::ValueObject)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let graph = context.graph();
        let mut resolved = Vec::new();
        for aggregate in graph.nodes_of(Label::Aggregate) {
            resolved.push(data_object::resolve_state_data(
                &options,
                aggregate,
                context.contents(),
            )?);
        }
        for value_object in graph.nodes_of(Label::ValueObject) {
            resolved.push(data_object::resolve_value_data(
                &options,
                value_object,
                context.contents(),
            )?);
        }
        Ok(resolved)
    }
}

pub struct ProjectionGeneration;

impl TemplateDataFactory for ProjectionGeneration {
    fn name(&self) -> &'static str {
        "projection_generation"
    }

    /// Runs when a projection type other than `NONE` is chosen. An unreadable
    /// projection type lets the step run so `build` reports the error.
    fn should_process(&self, context: &ExecutionContext) -> bool {
        context
            .graph()
            .value_as_or(Label::ProjectionType, ProjectionType::None)
            .map(|p| p.is_projection_enabled())
            .unwrap_or(true)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        Ok(context
            .graph()
            .nodes_of(Label::Aggregate)
            .filter_map(|aggregate| projection::resolve(&options, aggregate))
            .collect())
    }
}

pub struct StorageGeneration;

impl TemplateDataFactory for StorageGeneration {
    fn name(&self) -> &'static str {
        "storage_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::Aggregate)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let databases = store_provider::databases(&options, context.graph())?;
        let mut resolved: Vec<TemplateData> = databases
            .iter()
            .map(|(model, database)| {
                store_provider::resolve_provider(&options, *model, *database, context.contents())
            })
            .collect();
        resolved.push(store_provider::resolve_database_properties(
            &options, &databases,
        ));
        Ok(resolved)
    }
}

pub struct RestResourceUnitTestGeneration;

impl TemplateDataFactory for RestResourceUnitTestGeneration {
    fn name(&self) -> &'static str {
        "rest_resource_unit_test_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context
            .graph()
            .nodes_of(Label::Aggregate)
            .any(|a| a.has_related(Label::RouteSignature))
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let mut resolved = Vec::new();
        for aggregate in context.graph().nodes_of(Label::Aggregate) {
            resolved.extend(rest_resource_test::resolve(&options, aggregate)?);
        }
        Ok(resolved)
    }
}

pub struct EntityUnitTestGeneration;

impl TemplateDataFactory for EntityUnitTestGeneration {
    fn name(&self) -> &'static str {
        "entity_unit_test_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::Aggregate)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        let resolved = context
            .graph()
            .nodes_of(Label::Aggregate)
            .map(|aggregate| entity_unit_test::resolve(&options, aggregate, context.contents()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(resolved)
    }
}

pub struct DesignerModelGeneration;

impl TemplateDataFactory for DesignerModelGeneration {
    fn name(&self) -> &'static str {
        "designer_model_generation"
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        context.graph().has_node(Label::DesignerModelJson)
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError> {
        let options = ProjectOptions::from_graph(context.graph())?;
        Ok(vec![designer_model::resolve(&options, context.graph())?])
    }
}

/// One manifest line
#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    kind: &'a str,
    name: &'a str,
    path: String,
    digest: String,
}

/// Writes a JSON manifest of every registered content item to the `manifest`
/// output.
pub struct ContentManifestStep;

pub const MANIFEST_OUTPUT: &str = "manifest";

impl Step for ContentManifestStep {
    fn name(&self) -> &str {
        "content_manifest"
    }

    fn process(&self, context: &mut ExecutionContext) -> Result<(), StepError> {
        let entries: Vec<ManifestEntry<'_>> = context
            .contents()
            .iter()
            .map(|c| ManifestEntry {
                kind: c.kind.as_str(),
                name: &c.name,
                path: c.path.to_string_lossy().replace('\\', "/"),
                digest: c.digest(),
            })
            .collect();
        let manifest = serde_json::to_string_pretty(&entries)?;
        info!(entries = entries.len(), "Content manifest written");
        context.put_output(MANIFEST_OUTPUT, Output::Text(manifest));
        Ok(())
    }
}
