//! Designer model export: the raw model JSON written back as a resource.

use crate::codegen::ProjectOptions;
use crate::error::QueryError;
use crate::graph::ParameterGraph;
use crate::label::Label;
use crate::template::{TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};

const TEMPLATE: &str = "DesignerModel";

pub fn resolve(options: &ProjectOptions, graph: &ParameterGraph) -> Result<TemplateData, QueryError> {
    let app_name = options.application_name();
    let parameters = TemplateParameters::with(TemplateParameter::ResourceFile, true)
        .and(TemplateParameter::ApplicationName, app_name)
        .and(
            TemplateParameter::DesignerModelJson,
            graph.value_of(Label::DesignerModelJson)?,
        );
    Ok(
        TemplateData::new(TemplateStandard::DesignerModel, app_name, TEMPLATE, parameters)
            .placed(options.dialect, None),
    )
}
