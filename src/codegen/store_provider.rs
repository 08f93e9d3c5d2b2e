//! Storage resolution: store providers per model and the database properties
//! resource.

use crate::codegen::kinds::{DatabaseType, ModelKind};
use crate::codegen::ProjectOptions;
use crate::context::ContentRegistry;
use crate::error::QueryError;
use crate::graph::ParameterGraph;
use crate::label::Label;
use crate::template::{TemplateData, TemplateParameter, TemplateParameters, TemplateStandard};

const DATABASE_PROPERTIES_TEMPLATE: &str = "DatabaseProperties";

/// Models that need a store, each with its database.
pub fn databases(
    options: &ProjectOptions,
    graph: &ParameterGraph,
) -> Result<Vec<(ModelKind, DatabaseType)>, QueryError> {
    let shared = graph.value_as_or(Label::Database, DatabaseType::InMemory)?;
    if !options.cqrs {
        return Ok(vec![(ModelKind::Command, shared)]);
    }
    Ok(vec![
        (
            ModelKind::Command,
            graph.value_as_or(Label::CommandModelDatabase, shared)?,
        ),
        (
            ModelKind::Query,
            graph.value_as_or(Label::QueryModelDatabase, shared)?,
        ),
    ])
}

/// Store provider for one side of the model.
pub fn resolve_provider(
    options: &ProjectOptions,
    model: ModelKind,
    database: DatabaseType,
    contents: &ContentRegistry,
) -> TemplateData {
    let policy = options.storage.policy();
    let storage = policy.storage_for(model);
    let classname = policy.store_provider_classname(model);
    let template = policy.store_provider_template(model);
    let package = TemplateStandard::StoreProvider.resolve_package(&options.package, &classname);

    let mut parameters = TemplateParameters::with(
        TemplateParameter::PackageName,
        package.clone().unwrap_or_default(),
    )
    .and(TemplateParameter::StoreProviderName, classname.as_str())
    .and(TemplateParameter::Model, model.as_str())
    .and(TemplateParameter::StorageType, storage.as_str())
    .and(TemplateParameter::DatabaseType, database.as_str())
    .and(TemplateParameter::StoreActor, storage.policy().store_actor(database))
    .and(TemplateParameter::UseCqrs, options.cqrs);

    // The command side registers every generated state and its adapter.
    if !model.is_query_model() {
        for kind in [TemplateStandard::AggregateState, TemplateStandard::StateAdapter] {
            parameters = parameters.add_imports(
                contents
                    .of_kind(kind)
                    .filter_map(|c| c.qualified_name(options.dialect)),
            );
        }
    }

    TemplateData::new(TemplateStandard::StoreProvider, classname, template, parameters)
        .placed(options.dialect, package.as_deref())
}

/// Database properties resource listing each model's connection settings.
pub fn resolve_database_properties(
    options: &ProjectOptions,
    databases: &[(ModelKind, DatabaseType)],
) -> TemplateData {
    let app_name = options.application_name();
    let records: Vec<TemplateParameters> = databases
        .iter()
        .map(|(model, database)| {
            let mut record = TemplateParameters::with(TemplateParameter::Model, model.as_str())
                .and(TemplateParameter::DatabaseType, database.as_str());
            if let Some(driver) = database.driver() {
                record = record.and(TemplateParameter::DatabaseDriver, driver);
            }
            if let Some(url) = database.url(app_name) {
                record = record.and(TemplateParameter::DatabaseUrl, url);
            }
            record
        })
        .collect();

    let parameters = TemplateParameters::with(TemplateParameter::ResourceFile, true)
        .and(TemplateParameter::ProductionCode, false)
        .and(TemplateParameter::ApplicationName, app_name)
        .and(TemplateParameter::DatabaseParameters, records);

    TemplateData::new(
        TemplateStandard::DatabaseProperties,
        app_name,
        DATABASE_PROPERTIES_TEMPLATE,
        parameters,
    )
    .placed(options.dialect, None)
}
