//! Property-based tests for generation determinism

use modelgen::catalog::Catalog;
use modelgen::codegen::rest_resource_test::path_variable_count;
use modelgen::codegen::steps::MANIFEST_OUTPUT;
use modelgen::context::ExecutionContext;
use modelgen::pipeline::Task;
use modelgen::settings::{AggregateSetting, ApiSetting, FieldSetting, GenerationSettings};
use modelgen::template::{JsonRenderer, TemplateParameter, TemplateParameters};
use proptest::prelude::*;
use std::sync::Arc;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}"
}

fn aggregate_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}"
}

fn settings_strategy() -> impl Strategy<Value = GenerationSettings> {
    (
        aggregate_name(),
        prop::collection::btree_set(identifier(), 1..5),
        prop::sample::select(vec!["STATE_STORE", "JOURNAL", "OBJECT_STORE"]),
        any::<bool>(),
    )
        .prop_map(|(name, fields, storage, cqrs)| {
            let mut settings = GenerationSettings::default();
            settings.context.package = "com.example.app".to_string();
            settings.model.persistence.storage_type = storage.to_string();
            settings.model.persistence.use_cqrs = cqrs;
            settings.model.aggregate_settings.push(AggregateSetting {
                aggregate_name: name,
                state_fields: fields
                    .into_iter()
                    .map(|f| FieldSetting {
                        name: f,
                        field_type: "String".to_string(),
                        collection_type: None,
                    })
                    .collect(),
                events: Vec::new(),
                methods: Vec::new(),
                api: ApiSetting::default(),
            });
            settings
        })
}

fn manifest(settings: &GenerationSettings) -> String {
    let catalog = Catalog::shared();
    let graph = settings.to_graph(&catalog.taxonomy).unwrap();
    let mut context = ExecutionContext::new(catalog, graph);
    Task::ProjectGeneration
        .pipeline(Arc::new(JsonRenderer::new()))
        .run(&mut context)
        .unwrap();
    context
        .output(MANIFEST_OUTPUT)
        .and_then(|o| o.as_text())
        .unwrap()
        .to_string()
}

proptest! {
    /// Identical requests produce byte-identical manifests (paths and digests).
    #[test]
    fn generation_is_deterministic(settings in settings_strategy()) {
        prop_assert_eq!(manifest(&settings), manifest(&settings));
    }

    /// Record digests do not depend on insertion order.
    #[test]
    fn record_digest_ignores_insertion_order(a in identifier(), b in identifier()) {
        let forward = TemplateParameters::with(TemplateParameter::StateName, a.as_str())
            .and(TemplateParameter::MethodName, b.as_str());
        let backward = TemplateParameters::with(TemplateParameter::MethodName, b.as_str())
            .and(TemplateParameter::StateName, a.as_str());
        prop_assert_eq!(forward.digest().unwrap(), backward.digest().unwrap());
    }

    #[test]
    fn counts_every_placeholder(segments in prop::collection::vec((identifier(), any::<bool>()), 0..6)) {
        let mut path = String::new();
        let mut expected = 0;
        for (segment, variable) in &segments {
            if *variable {
                path.push_str(&format!("/{{{}}}", segment));
                expected += 1;
            } else {
                path.push_str(&format!("/{}", segment));
            }
        }
        prop_assert_eq!(path_variable_count(&path), expected);
    }
}

/// Different aggregates never collide on a content path.
#[test]
fn distinct_aggregates_distinct_paths() {
    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(&(aggregate_name(), aggregate_name()), |(first, second)| {
            prop_assume!(first.to_lowercase() != second.to_lowercase());
            let mut settings = GenerationSettings::default();
            settings.context.package = "com.example.app".to_string();
            for name in [first, second] {
                settings.model.aggregate_settings.push(AggregateSetting {
                    aggregate_name: name,
                    state_fields: Vec::new(),
                    events: Vec::new(),
                    methods: Vec::new(),
                    api: ApiSetting::default(),
                });
            }
            let entries: Vec<serde_json::Value> =
                serde_json::from_str(&manifest(&settings)).unwrap();
            let mut paths: Vec<&str> = entries.iter().filter_map(|e| e["path"].as_str()).collect();
            let total = paths.len();
            paths.sort_unstable();
            paths.dedup();
            prop_assert_eq!(paths.len(), total);
            Ok(())
        })
        .unwrap();
}
