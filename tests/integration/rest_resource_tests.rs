//! REST resource unit tests generated from route signatures.

use super::test_utils::{content, generate, rendered};
use modelgen::settings::GenerationSettings;
use modelgen::template::TemplateStandard;
use serde_json::json;
use std::path::Path;

const AUTHOR_API: &str = r#"{
    "context": { "package": "io.vlingo.xoomapp" },
    "model": {
        "aggregateSettings": [{
            "aggregateName": "Author",
            "stateFields": [
                { "name": "id", "type": "String" },
                { "name": "name", "type": "String" },
                { "name": "tags", "type": "String", "collectionType": "Set" }
            ],
            "events": [
                { "name": "AuthorRegistered", "fields": ["id", "name"] },
                { "name": "AuthorRenamed", "fields": ["name"] }
            ],
            "methods": [
                { "name": "withName", "factory": true, "parameters": ["name"] },
                { "name": "changeName", "parameters": ["name"], "event": "AuthorRenamed" },
                { "name": "addTag", "parameters": [{ "stateField": "tags", "collectionMutation": "ADDITION" }] },
                { "name": "relate", "parameters": ["id", "name"] }
            ],
            "api": {
                "rootPath": "/authors",
                "routes": [
                    { "path": "/", "httpMethod": "POST", "aggregateMethod": "withName" },
                    { "path": "/{id}/name", "httpMethod": "PATCH", "aggregateMethod": "changeName", "requireEntityLoad": true },
                    { "path": "/{id}/tags", "httpMethod": "PATCH", "aggregateMethod": "addTag", "requireEntityLoad": true },
                    { "path": "/authors/{id}/books/{bookId}", "httpMethod": "PUT", "aggregateMethod": "relate" }
                ]
            }
        }],
        "persistence": { "storageType": "JOURNAL" }
    }
}"#;

fn test_cases() -> Vec<serde_json::Value> {
    let settings = GenerationSettings::from_json(AUTHOR_API).unwrap();
    let context = generate(&settings);
    let test = content(
        &context,
        TemplateStandard::RestResourceUnitTest,
        "AuthorResourceTest",
    );
    assert_eq!(
        test.path,
        Path::new("src/test/java/io/vlingo/xoomapp/infrastructure/resource/AuthorResourceTest.java")
    );
    let record = rendered(test);
    assert_eq!(record["parameters"]["uriRoot"], "/authors");
    record["parameters"]["testCases"].as_array().unwrap().clone()
}

#[test]
fn one_case_per_route_in_order() {
    let cases = test_cases();
    let methods: Vec<&str> = cases
        .iter()
        .filter_map(|c| c["methodName"].as_str())
        .collect();
    assert_eq!(methods, vec!["withName", "changeName", "addTag", "relate"]);

    assert_eq!(cases[0]["rootMethod"], "post");
    assert_eq!(cases[0]["isRootMethod"], false);
    assert_eq!(cases[0]["rootPath"], "/authors/");
    assert_eq!(cases[1]["rootMethod"], "patch");
    assert_eq!(cases[1]["isRootMethod"], true);
    assert_eq!(cases[1]["rootPath"], "/authors/{id}/name");
}

#[test]
fn unsupported_cases_are_disabled() {
    let cases = test_cases();
    assert_eq!(cases[0]["disabled"], false);
    assert_eq!(cases[1]["disabled"], false);
    // single-element collection mutation
    assert_eq!(cases[2]["disabled"], true);
    // two path variables; the route path already carries the root
    assert_eq!(cases[3]["disabled"], true);
    assert_eq!(cases[3]["rootPath"], "/authors/{id}/books/{bookId}");
}

#[test]
fn self_describing_events_are_listed() {
    let cases = test_cases();
    assert_eq!(cases[0]["selfDescribingEvents"], "[AuthorRenamed]");
}

#[test]
fn aggregates_without_routes_get_no_test() {
    let mut settings = GenerationSettings::from_json(AUTHOR_API).unwrap();
    settings.model.aggregate_settings[0].api.routes.clear();
    let context = generate(&settings);
    assert!(!context
        .contents()
        .contains_kind(TemplateStandard::RestResourceUnitTest));
}

#[test]
fn entity_loading_and_dispatch_options_reach_the_record() {
    let mut settings = GenerationSettings::from_json(AUTHOR_API).unwrap();
    settings.options.insert("useAnnotations".to_string(), json!(true));
    settings.options.insert("useAutoDispatch".to_string(), json!("true"));
    let context = generate(&settings);
    let record = rendered(content(
        &context,
        TemplateStandard::RestResourceUnitTest,
        "AuthorResourceTest",
    ));
    let parameters = &record["parameters"];
    assert_eq!(parameters["useAnnotations"], true);
    assert_eq!(parameters["useAutoDispatch"], true);

    let loading: Vec<bool> = parameters["testCases"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["requireEntityLoading"].as_bool())
        .collect();
    assert_eq!(loading, vec![false, true, true, false]);
}

#[test]
fn dispatch_options_default_off() {
    let settings = GenerationSettings::from_json(AUTHOR_API).unwrap();
    let context = generate(&settings);
    let record = rendered(content(
        &context,
        TemplateStandard::RestResourceUnitTest,
        "AuthorResourceTest",
    ));
    assert_eq!(record["parameters"]["useAnnotations"], false);
    assert_eq!(record["parameters"]["useAutoDispatch"], false);
}

#[test]
fn journal_entity_test_is_generated_next_to_the_model() {
    let settings = GenerationSettings::from_json(AUTHOR_API).unwrap();
    let context = generate(&settings);
    let test = content(&context, TemplateStandard::EntityUnitTest, "AuthorEntityTest");
    assert_eq!(
        test.path,
        Path::new("src/test/java/io/vlingo/xoomapp/model/author/AuthorEntityTest.java")
    );
    let record = rendered(test);
    assert_eq!(record["template"], "EntityUnitTest");
    let parameters = &record["parameters"];
    assert_eq!(parameters["entityTemplate"], "EventSourcedEntity");
    assert_eq!(parameters["dispatcherName"], "MockDispatcher");
    assert_eq!(parameters["defaultFactoryMethod"], "withName");
    assert_eq!(
        parameters["sourcedEvents"],
        json!(["AuthorRegistered", "AuthorRenamed"])
    );
    let imports: Vec<&str> = parameters["imports"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i.as_str())
        .collect();
    assert!(imports.contains(&"io.vlingo.xoomapp.infrastructure.persistence.AuthorRenamedAdapter"));
    assert!(imports.contains(&"io.vlingo.xoomapp.infrastructure.persistence.MockDispatcher"));
    assert!(imports.contains(&"java.util.Set"));
}
