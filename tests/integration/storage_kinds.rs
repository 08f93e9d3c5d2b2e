//! Generated storage artifacts for each storage kind.

use super::test_utils::{author_settings, content, generate, rendered};
use modelgen::template::TemplateStandard;
use std::collections::BTreeSet;

fn provider_names(storage: &str, cqrs: bool) -> Vec<String> {
    let context = generate(&author_settings(storage, cqrs));
    context
        .contents()
        .of_kind(TemplateStandard::StoreProvider)
        .map(|c| c.name.clone())
        .collect()
}

fn strings(value: &serde_json::Value) -> BTreeSet<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|i| i.to_string()).collect()
}

const VALUE_OBJECT_IMPORTS: [&str; 2] = ["io.vlingo.xoomapp.model.Name", "io.vlingo.xoomapp.model.Rank"];

/// State template, state imports, adapter presence and entity template of
/// the Author model under one storage kind.
fn assert_model(storage: &str, state_template: &str, symbio_import: &[&str], adapter: bool, entity: &str) {
    let context = generate(&author_settings(storage, false));
    let state = rendered(content(&context, TemplateStandard::AggregateState, "AuthorState"));
    assert_eq!(state["template"], state_template, "{}", storage);

    let mut expected = set(symbio_import);
    expected.extend(set(&VALUE_OBJECT_IMPORTS));
    assert_eq!(strings(&state["parameters"]["imports"]), expected, "{}", storage);

    assert_eq!(
        context.contents().contains_kind(TemplateStandard::StateAdapter),
        adapter,
        "{}",
        storage
    );
    let entity_test = rendered(content(&context, TemplateStandard::EntityUnitTest, "AuthorEntityTest"));
    assert_eq!(entity_test["parameters"]["entityTemplate"], entity, "{}", storage);
}

#[test]
fn state_store_model() {
    assert_model(
        "STATE_STORE",
        "StateObject",
        &["io.vlingo.xoom.symbio.State", "io.vlingo.xoom.symbio.StateAdapter"],
        true,
        "StatefulEntity",
    );
}

#[test]
fn journal_model() {
    assert_model(
        "JOURNAL",
        "PlainState",
        &["io.vlingo.xoom.symbio.Source"],
        false,
        "EventSourcedEntity",
    );
}

#[test]
fn object_store_model() {
    assert_model(
        "OBJECT_STORE",
        "StateObject",
        &["io.vlingo.xoom.symbio.store.object.StateObject"],
        false,
        "ObjectEntity",
    );
}

#[test]
fn journal_state_is_event_sourced_without_adapter() {
    let context = generate(&author_settings("JOURNAL", false));
    let state = rendered(content(&context, TemplateStandard::AggregateState, "AuthorState"));
    assert_eq!(state["template"], "PlainState");
    assert_eq!(state["parameters"]["eventSourced"], true);
    assert!(!context.contents().contains_kind(TemplateStandard::StateAdapter));
}

#[test]
fn journal_query_model_uses_a_state_store() {
    assert_eq!(provider_names("JOURNAL", false), vec!["CommandModelJournalProvider"]);

    let context = generate(&author_settings("JOURNAL", true));
    let query = rendered(content(
        &context,
        TemplateStandard::StoreProvider,
        "QueryModelStateStoreProvider",
    ));
    assert_eq!(query["template"], "QueryModelJournalProvider");
    assert_eq!(query["parameters"]["storageType"], "STATE_STORE");
    assert_eq!(query["parameters"]["useCQRS"], true);
}

#[test]
fn object_and_state_stores() {
    assert_eq!(
        provider_names("OBJECT_STORE", false),
        vec!["CommandModelObjectStoreProvider"]
    );
    assert_eq!(
        provider_names("STATE_STORE", true),
        vec!["CommandModelStateStoreProvider", "QueryModelStateStoreProvider"]
    );
}

#[test]
fn command_provider_imports_generated_states() {
    let context = generate(&author_settings("STATE_STORE", false));
    let provider = rendered(content(
        &context,
        TemplateStandard::StoreProvider,
        "CommandModelStateStoreProvider",
    ));
    let imports = provider["parameters"]["imports"].as_array().unwrap();
    assert!(imports.iter().any(|i| i == "io.vlingo.xoomapp.model.author.AuthorState"));
    assert!(imports
        .iter()
        .any(|i| i == "io.vlingo.xoomapp.infrastructure.persistence.AuthorStateAdapter"));
}
