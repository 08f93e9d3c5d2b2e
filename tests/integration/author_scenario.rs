//! End-to-end generation of the Author model over a state store.

use super::test_utils::{author_settings, content, generate, rendered};
use modelgen::codegen::steps::MANIFEST_OUTPUT;
use modelgen::context::TaskStatus;
use modelgen::template::TemplateStandard;
use std::path::Path;

#[test]
fn author_state_over_state_store() {
    let context = generate(&author_settings("STATE_STORE", false));
    assert_eq!(context.status(), TaskStatus::Completed);

    let state = content(&context, TemplateStandard::AggregateState, "AuthorState");
    assert_eq!(
        state.path,
        Path::new("src/main/java/io/vlingo/xoomapp/model/author/AuthorState.java")
    );
    let record = rendered(state);
    assert_eq!(record["template"], "StateObject");
    let parameters = &record["parameters"];
    assert_eq!(parameters["eventSourced"], false);
    assert_eq!(parameters["idType"], "String");
    assert_eq!(parameters["members"].as_array().unwrap().len(), 3);
    assert_eq!(parameters["methods"].as_array().unwrap().len(), 1);

    let imports: Vec<&str> = parameters["imports"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i.as_str())
        .collect();
    assert!(imports.contains(&"io.vlingo.xoomapp.model.Name"));
    assert!(imports.contains(&"io.vlingo.xoom.symbio.State"));
}

#[test]
fn generates_every_supporting_artifact() {
    let context = generate(&author_settings("STATE_STORE", false));

    let value_object = content(&context, TemplateStandard::ValueObject, "Name");
    assert_eq!(
        value_object.path,
        Path::new("src/main/java/io/vlingo/xoomapp/model/Name.java")
    );
    content(&context, TemplateStandard::StateAdapter, "AuthorStateAdapter");
    content(&context, TemplateStandard::DataObject, "NameData");

    let data = rendered(content(&context, TemplateStandard::DataObject, "AuthorData"));
    let imports = data["parameters"]["imports"].as_array().unwrap();
    assert!(imports.iter().any(|i| i == "io.vlingo.xoomapp.model.author.AuthorState"));
    assert!(imports.iter().any(|i| i == "io.vlingo.xoomapp.model.*"));

    let provider = rendered(content(
        &context,
        TemplateStandard::StoreProvider,
        "CommandModelStateStoreProvider",
    ));
    assert_eq!(provider["parameters"]["storeActor"], "InMemoryStateStoreActor");

    let properties = content(&context, TemplateStandard::DatabaseProperties, "database");
    assert_eq!(properties.path, Path::new("src/main/resources/database.properties"));

    let designer = content(&context, TemplateStandard::DesignerModel, "xoomapp-designer-model");
    assert_eq!(
        designer.path,
        Path::new("src/main/resources/xoomapp-designer-model.json")
    );

    assert!(!context.contents().contains_kind(TemplateStandard::Projection));
    assert!(!context.contents().contains_kind(TemplateStandard::RestResourceUnitTest));
}

#[test]
fn manifest_lists_all_contents() {
    let context = generate(&author_settings("STATE_STORE", false));
    let manifest = context.output(MANIFEST_OUTPUT).and_then(|o| o.as_text()).unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(manifest).unwrap();
    assert_eq!(entries.len(), context.contents().len());

    let state = content(&context, TemplateStandard::AggregateState, "AuthorState");
    let entry = entries
        .iter()
        .find(|e| e["name"] == "AuthorState")
        .unwrap();
    assert_eq!(entry["digest"], state.digest());
    assert_eq!(entry["kind"], "AGGREGATE_STATE");
}
