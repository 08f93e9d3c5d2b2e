//! Data object resolution: `{Aggregate}Data` for aggregate states and
//! `{ValueObject}Data` for value objects.

use crate::codegen::formatting;
use crate::codegen::kinds::Dialect;
use crate::codegen::ProjectOptions;
use crate::context::ContentRegistry;
use crate::error::QueryError;
use crate::graph::NodeRef;
use crate::label::Label;
use crate::template::{TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};

const STATE_TEMPLATE: &str = "StateDataObject";
const VALUE_TEMPLATE: &str = "ValueDataObject";

pub(crate) fn import_all_from(package: Option<String>, dialect: Dialect) -> Option<String> {
    package.map(|p| match dialect {
        Dialect::CSharp => p,
        Dialect::Java | Dialect::Kotlin => format!("{}.*", p),
    })
}

/// Data object mirroring an aggregate's state.
pub fn resolve_state_data(
    options: &ProjectOptions,
    aggregate: NodeRef<'_>,
    contents: &ContentRegistry,
) -> Result<TemplateData, QueryError> {
    let name = aggregate.text().into_owned();
    let dialect = options.dialect;
    let fields = formatting::fields_of(aggregate, Label::StateField)?;
    let package = TemplateStandard::DataObject.resolve_package(&options.package, &name);
    let state = TemplateStandard::AggregateState.resolve_classname(&name);

    let mut parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(
        TemplateParameter::DataObjectName,
        TemplateStandard::DataObject.resolve_classname(&name),
    )
    .and(TemplateParameter::StateName, state.as_str())
    .and(TemplateParameter::Members, formatting::members(dialect, &fields))
    .and(
        TemplateParameter::MembersAssignment,
        formatting::assignments(dialect, &fields),
    )
    .and(
        TemplateParameter::ConstructorParameters,
        formatting::signature(dialect, &fields),
    )
    .add_imports(formatting::collection_imports(dialect, &fields));

    if let Some(state_content) = contents.find(TemplateStandard::AggregateState, &state) {
        parameters = parameters.add_imports(state_content.qualified_name(dialect));
    }
    let value_objects = contents.find_package(TemplateStandard::ValueObject, dialect);
    parameters = parameters.add_imports(import_all_from(value_objects, dialect));

    Ok(
        TemplateData::new(TemplateStandard::DataObject, name, STATE_TEMPLATE, parameters)
            .placed(dialect, package.as_deref()),
    )
}

/// Data object mirroring a value object.
pub fn resolve_value_data(
    options: &ProjectOptions,
    value_object: NodeRef<'_>,
    contents: &ContentRegistry,
) -> Result<TemplateData, QueryError> {
    let name = value_object.text().into_owned();
    let dialect = options.dialect;
    let fields = formatting::fields_of(value_object, Label::ValueObjectField)?;
    let package = TemplateStandard::DataObject.resolve_package(&options.package, &name);
    let field_names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

    let parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(TemplateParameter::ValueObjectName, name.as_str())
    .and(
        TemplateParameter::DataObjectName,
        TemplateStandard::DataObject.resolve_classname(&name),
    )
    .and(TemplateParameter::ValueObjectFields, field_names.join(", "))
    .and(TemplateParameter::Members, formatting::members(dialect, &fields))
    .and(
        TemplateParameter::MembersAssignment,
        formatting::assignments(dialect, &fields),
    )
    .and(
        TemplateParameter::ConstructorParameters,
        formatting::signature(dialect, &fields),
    )
    .add_imports(import_all_from(
        contents.find_package(TemplateStandard::ValueObject, dialect),
        dialect,
    ))
    .add_imports(formatting::collection_imports(dialect, &fields));

    Ok(
        TemplateData::new(TemplateStandard::DataObject, name, VALUE_TEMPLATE, parameters)
            .placed(dialect, package.as_deref()),
    )
}
