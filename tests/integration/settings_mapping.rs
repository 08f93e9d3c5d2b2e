//! Settings documents mapped into parameter graphs.

use super::test_utils::author_settings;
use modelgen::codegen::kinds::{Deployment, Dialect, StorageType};
use modelgen::codegen::ProjectOptions;
use modelgen::error::SettingsError;
use modelgen::label::{Label, LabelTaxonomy};
use modelgen::settings::GenerationSettings;
use std::io::Write;

#[test]
fn project_options_come_from_the_graph() {
    let graph = author_settings("JOURNAL", true)
        .to_graph(&LabelTaxonomy::standard())
        .unwrap();
    let options = ProjectOptions::from_graph(&graph).unwrap();
    assert_eq!(options.package, "io.vlingo.xoomapp");
    assert_eq!(options.application_name(), "xoomapp");
    assert_eq!(options.dialect, Dialect::Java);
    assert_eq!(options.storage, StorageType::Journal);
    assert!(options.cqrs);
}

#[test]
fn events_share_state_field_nodes() {
    let graph = author_settings("STATE_STORE", false)
        .to_graph(&LabelTaxonomy::standard())
        .unwrap();
    let author = graph.node_of(Label::Aggregate).unwrap();
    let event = author.one_related(Label::DomainEvent).unwrap();
    let fields: Vec<String> = event
        .related(Label::StateField)
        .map(|f| f.text().into_owned())
        .collect();
    assert_eq!(fields, vec!["id", "name"]);

    let method = author.one_related(Label::AggregateMethod).unwrap();
    assert!(method.related_value_as::<bool>(Label::FactoryMethod).unwrap());
    assert_eq!(method.one_related(Label::DomainEvent).unwrap().id(), event.id());
}

#[test]
fn designer_model_round_trips() {
    let settings = author_settings("STATE_STORE", false);
    let graph = settings.to_graph(&LabelTaxonomy::standard()).unwrap();
    let json = graph.value_of(Label::DesignerModelJson).unwrap();
    let model: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(model["aggregateSettings"][0]["aggregateName"], "Author");
    assert_eq!(model["persistence"]["storageType"], "STATE_STORE");
}

#[test]
fn loads_toml_files() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[context]
package = "com.example.shop"
dialect = "KOTLIN"

[model.persistence]
storageType = "OBJECT_STORE"
database = "POSTGRES"

[[model.valueObjectSettings]]
name = "Money"
fields = [{{ name = "amount", type = "Double" }}]

[options]
tag = "2.0.1"
groupId = "com.example"
deployment = "KUBERNETES"
"#
    )
    .unwrap();

    let settings = GenerationSettings::load(file.path()).unwrap();
    let graph = settings.to_graph(&LabelTaxonomy::standard()).unwrap();
    assert_eq!(graph.value_as::<Dialect>(Label::Dialect).unwrap(), Dialect::Kotlin);
    assert_eq!(graph.value_of(Label::Database).unwrap(), "POSTGRES");
    assert_eq!(graph.value_of(Label::Tag).unwrap(), "2.0.1");
    assert_eq!(graph.value_of(Label::GroupId).unwrap(), "com.example");
    assert_eq!(
        graph.value_as::<Deployment>(Label::Deployment).unwrap(),
        Deployment::Kubernetes
    );
    assert_eq!(
        graph
            .node_of(Label::ValueObject)
            .unwrap()
            .count_related(Label::ValueObjectField),
        1
    );
}

#[test]
fn invalid_documents_are_rejected() {
    let mut settings = author_settings("STATE_STORE", false);
    settings.context.dialect = Some("COBOL".to_string());
    assert!(matches!(
        settings.to_graph(&LabelTaxonomy::standard()),
        Err(SettingsError::InvalidValue { key, .. }) if key == "dialect"
    ));

    let mut settings = author_settings("STATE_STORE", false);
    settings
        .options
        .insert("stateField".to_string(), serde_json::json!("rank"));
    assert!(matches!(
        settings.to_graph(&LabelTaxonomy::standard()),
        Err(SettingsError::InvalidValue { .. })
    ));

    assert!(matches!(
        GenerationSettings::from_json("{ not json"),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(
        GenerationSettings::load(std::path::Path::new("/definitely/absent.json")),
        Err(SettingsError::Io(_))
    ));
}
