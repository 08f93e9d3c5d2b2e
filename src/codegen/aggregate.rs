//! Aggregate state resolution.
//!
//! One state record per aggregate, with one dependent per aggregate method
//! folded into `methods`. State stores additionally get a state adapter.

use crate::codegen::formatting::{self, Field};
use crate::codegen::kinds::CollectionMutation;
use crate::codegen::ProjectOptions;
use crate::context::ContentRegistry;
use crate::error::QueryError;
use crate::graph::NodeRef;
use crate::label::Label;
use crate::template::{Fold, TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};
use std::collections::BTreeSet;

const METHOD_TEMPLATE: &str = "AggregateStateMethod";

/// Mutation applied by a method: its sole parameter's `COLLECTION_MUTATION`,
/// `NONE` for methods with zero or several parameters.
pub fn collection_mutation(method: NodeRef<'_>) -> Result<CollectionMutation, QueryError> {
    let mut parameters = method.related(Label::MethodParameter);
    match (parameters.next(), parameters.next()) {
        (Some(only), None) => {
            only.related_value_as_or(Label::CollectionMutation, CollectionMutation::None)
        }
        _ => Ok(CollectionMutation::None),
    }
}

/// Imports of value objects used as field types, resolved against already
/// generated content.
pub fn value_object_imports(
    options: &ProjectOptions,
    fields: &[Field],
    contents: &ContentRegistry,
) -> BTreeSet<String> {
    fields
        .iter()
        .filter_map(|f| contents.find(TemplateStandard::ValueObject, &f.ty))
        .filter_map(|c| c.qualified_name(options.dialect))
        .collect()
}

/// Fully qualified name of an aggregate's state class.
pub fn state_qualified_name(options: &ProjectOptions, aggregate: &str) -> String {
    let package = TemplateStandard::AggregateState
        .resolve_package(&options.package, aggregate)
        .unwrap_or_else(|| options.package.clone());
    format!(
        "{}.{}",
        package,
        TemplateStandard::AggregateState.resolve_classname(aggregate)
    )
}

fn resolve_method(method: NodeRef<'_>) -> Result<TemplateData, QueryError> {
    let name = method.text().into_owned();
    let parameters: Vec<String> = method
        .related(Label::MethodParameter)
        .map(|p| p.text().into_owned())
        .collect();
    let mutation = collection_mutation(method)?;
    let record = TemplateParameters::with(TemplateParameter::MethodName, name.as_str())
        .and(TemplateParameter::MethodParameters, parameters.join(", "))
        .and(TemplateParameter::CollectionMutation, mutation.as_str())
        .and(
            TemplateParameter::SingleParameterMutation,
            mutation.is_single_parameter_based(),
        )
        .and(
            TemplateParameter::FactoryMethod,
            method.related_value_as_or(Label::FactoryMethod, false)?,
        );
    Ok(TemplateData::new(
        TemplateStandard::AggregateStateMethod,
        name,
        METHOD_TEMPLATE,
        record,
    ))
}

/// Resolve the state record of one aggregate.
pub fn resolve_state(
    options: &ProjectOptions,
    aggregate: NodeRef<'_>,
    contents: &ContentRegistry,
) -> Result<TemplateData, QueryError> {
    let name = aggregate.text().into_owned();
    let policy = options.storage.policy();
    let dialect = options.dialect;
    let fields = formatting::fields_of(aggregate, Label::StateField)?;
    let package = TemplateStandard::AggregateState.resolve_package(&options.package, &name);

    let methods = aggregate
        .related(Label::AggregateMethod)
        .map(resolve_method)
        .collect::<Result<Vec<_>, _>>()?;

    let parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(TemplateParameter::AggregateProtocolName, name.as_str())
    .and(
        TemplateParameter::StateName,
        TemplateStandard::AggregateState.resolve_classname(&name),
    )
    .and(TemplateParameter::EventSourced, policy.event_sourced)
    .and(TemplateParameter::StorageType, options.storage.as_str())
    .and(TemplateParameter::Members, formatting::members(dialect, &fields))
    .and(
        TemplateParameter::MembersAssignment,
        formatting::assignments(dialect, &fields),
    )
    .and(
        TemplateParameter::IdType,
        formatting::type_of(&fields, "id").unwrap_or_else(|| "String".to_string()),
    )
    .and(
        TemplateParameter::ConstructorParameters,
        formatting::signature(dialect, &fields),
    )
    .and(
        TemplateParameter::MethodInvocationParameters,
        formatting::reference_with_defaults(dialect, &fields, "id"),
    )
    .and(TemplateParameter::Methods, Vec::<String>::new())
    .add_imports(policy.state_imports.iter().copied())
    .add_imports(formatting::collection_imports(dialect, &fields))
    .add_imports(value_object_imports(options, &fields, contents));

    Ok(
        TemplateData::new(TemplateStandard::AggregateState, name, policy.state_template, parameters)
            .placed(dialect, package.as_deref())
            .depend_on(methods, Fold::AppendTo(TemplateParameter::Methods)),
    )
}

/// Resolve the state adapter of one aggregate, when the storage kind uses one.
pub fn resolve_adapter(
    options: &ProjectOptions,
    aggregate: NodeRef<'_>,
) -> Option<TemplateData> {
    let template = options.storage.policy().adapter_template?;
    let name = aggregate.text().into_owned();
    let state = TemplateStandard::AggregateState.resolve_classname(&name);
    let package = TemplateStandard::StateAdapter.resolve_package(&options.package, &state);
    let parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(TemplateParameter::StateName, state.as_str())
    .and(
        TemplateParameter::AdapterName,
        TemplateStandard::StateAdapter.resolve_classname(&state),
    )
    .add_import(state_qualified_name(options, &name));

    Some(
        TemplateData::new(TemplateStandard::StateAdapter, state, template, parameters)
            .placed(options.dialect, package.as_deref()),
    )
}
