//! Shared helpers: settings fixtures and a one-call project generation run.

use modelgen::catalog::Catalog;
use modelgen::context::{Content, ExecutionContext};
use modelgen::pipeline::Task;
use modelgen::settings::GenerationSettings;
use modelgen::template::{JsonRenderer, TemplateStandard};
use std::sync::Arc;

/// Author aggregate `{id: String, name: Name, rank: Rank}` over the given
/// storage kind, with `Name` and `Rank` value objects.
pub fn author_settings(storage: &str, cqrs: bool) -> GenerationSettings {
    GenerationSettings::from_json(&format!(
        r#"{{
            "context": {{ "package": "io.vlingo.xoomapp", "appName": "xoomapp" }},
            "model": {{
                "aggregateSettings": [{{
                    "aggregateName": "Author",
                    "stateFields": [
                        {{ "name": "id", "type": "String" }},
                        {{ "name": "name", "type": "Name" }},
                        {{ "name": "rank", "type": "Rank" }}
                    ],
                    "events": [{{ "name": "AuthorRegistered", "fields": ["id", "name"] }}],
                    "methods": [
                        {{ "name": "withName", "factory": true, "parameters": ["name"], "event": "AuthorRegistered" }}
                    ]
                }}],
                "valueObjectSettings": [{{
                    "name": "Name",
                    "fields": [
                        {{ "name": "first", "type": "String" }},
                        {{ "name": "last", "type": "String" }}
                    ]
                }}, {{
                    "name": "Rank",
                    "fields": [
                        {{ "name": "points", "type": "int" }},
                        {{ "name": "classification", "type": "String" }}
                    ]
                }}],
                "persistence": {{ "storageType": "{}", "useCQRS": {} }}
            }}
        }}"#,
        storage, cqrs
    ))
    .unwrap()
}

/// Run project generation to completion and return the context.
pub fn generate(settings: &GenerationSettings) -> ExecutionContext {
    let catalog = Catalog::shared();
    let graph = settings.to_graph(&catalog.taxonomy).unwrap();
    let mut context = ExecutionContext::new(catalog, graph);
    Task::ProjectGeneration
        .pipeline(Arc::new(JsonRenderer::new()))
        .run(&mut context)
        .unwrap();
    context
}

pub fn content<'a>(context: &'a ExecutionContext, kind: TemplateStandard, name: &str) -> &'a Content {
    context
        .contents()
        .find(kind, name)
        .unwrap_or_else(|| panic!("no {} content named {}", kind, name))
}

/// The record a [`JsonRenderer`] wrote into a content item.
pub fn rendered(content: &Content) -> serde_json::Value {
    serde_json::from_str(&content.text).unwrap()
}
