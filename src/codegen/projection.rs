//! Projection resolution: one projection actor per aggregate that emits events.

use crate::codegen::ProjectOptions;
use crate::graph::NodeRef;
use crate::label::Label;
use crate::template::{TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};

/// Resolve the projection of one aggregate. Returns `None` when projections
/// are disabled or the aggregate declares no domain events.
pub fn resolve(options: &ProjectOptions, aggregate: NodeRef<'_>) -> Option<TemplateData> {
    let template = options.projection.template()?;
    let sources: Vec<String> = aggregate
        .related(Label::DomainEvent)
        .map(|e| e.text().into_owned())
        .collect();
    if sources.is_empty() {
        return None;
    }

    let name = aggregate.text().into_owned();
    let package = TemplateStandard::Projection.resolve_package(&options.package, &name);
    let parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(
        TemplateParameter::ProjectionName,
        TemplateStandard::Projection.resolve_classname(&name),
    )
    .and(TemplateParameter::ProjectionType, options.projection.as_str())
    .and(
        TemplateParameter::StateName,
        TemplateStandard::AggregateState.resolve_classname(&name),
    )
    .and(
        TemplateParameter::DataObjectName,
        TemplateStandard::DataObject.resolve_classname(&name),
    )
    .and(TemplateParameter::ProjectionSources, sources)
    .add_import(format!(
        "{}.{}",
        TemplateStandard::DataObject
            .resolve_package(&options.package, &name)
            .unwrap_or_default(),
        TemplateStandard::DataObject.resolve_classname(&name)
    ));

    Some(
        TemplateData::new(TemplateStandard::Projection, name, template, parameters)
            .placed(options.dialect, package.as_deref()),
    )
}
