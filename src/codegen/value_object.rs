//! Value object resolution.

use crate::codegen::formatting;
use crate::codegen::ProjectOptions;
use crate::error::QueryError;
use crate::graph::NodeRef;
use crate::label::Label;
use crate::template::{TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};

const TEMPLATE: &str = "ValueObject";

pub fn resolve(options: &ProjectOptions, value_object: NodeRef<'_>) -> Result<TemplateData, QueryError> {
    let name = value_object.text().into_owned();
    let dialect = options.dialect;
    let fields = formatting::fields_of(value_object, Label::ValueObjectField)?;
    let package = TemplateStandard::ValueObject.resolve_package(&options.package, &name);
    let field_names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

    let parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(TemplateParameter::ValueObjectName, name.as_str())
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
    .add_imports(formatting::collection_imports(dialect, &fields));

    Ok(
        TemplateData::new(TemplateStandard::ValueObject, name, TEMPLATE, parameters)
            .placed(dialect, package.as_deref()),
    )
}
