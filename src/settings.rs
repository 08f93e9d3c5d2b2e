//! Generation settings
//!
//! The structured request a generation starts from (project context, the
//! designer model and persistence choices) plus a flat option map keyed by
//! label-taxonomy keys. [`GenerationSettings::to_graph`] maps the whole request
//! into a frozen [`ParameterGraph`].

use crate::codegen::kinds::{CollectionMutation, DatabaseType, Dialect, HttpMethod, ProjectionType, StorageType};
use crate::error::SettingsError;
use crate::graph::{GraphBuilder, NodeId, ParameterGraph, ParameterValue};
use crate::label::{Label, LabelScope, LabelTaxonomy, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Project identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSettings {
    #[serde(alias = "packageName")]
    pub package: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub dialect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSetting {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSetting {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// A method parameter, either a bare state-field name or a field with the
/// collection mutation it applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterSetting {
    Field(String),
    #[serde(rename_all = "camelCase")]
    Mutating {
        state_field: String,
        #[serde(default)]
        collection_mutation: Option<String>,
    },
}

impl ParameterSetting {
    fn state_field(&self) -> &str {
        match self {
            ParameterSetting::Field(name) => name,
            ParameterSetting::Mutating { state_field, .. } => state_field,
        }
    }

    fn collection_mutation(&self) -> Option<&str> {
        match self {
            ParameterSetting::Field(_) => None,
            ParameterSetting::Mutating {
                collection_mutation,
                ..
            } => collection_mutation.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSetting {
    pub name: String,
    #[serde(default)]
    pub factory: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSetting {
    pub path: String,
    pub http_method: String,
    pub aggregate_method: String,
    #[serde(default)]
    pub require_entity_load: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSetting {
    #[serde(default)]
    pub root_path: String,
    #[serde(default)]
    pub routes: Vec<RouteSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSetting {
    pub aggregate_name: String,
    #[serde(default)]
    pub state_fields: Vec<FieldSetting>,
    #[serde(default)]
    pub events: Vec<EventSetting>,
    #[serde(default)]
    pub methods: Vec<MethodSetting>,
    #[serde(default)]
    pub api: ApiSetting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueObjectSetting {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceSettings {
    pub storage_type: String,
    #[serde(rename = "useCQRS", default)]
    pub use_cqrs: bool,
    #[serde(default)]
    pub projections: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub command_model_database: Option<String>,
    #[serde(default)]
    pub query_model_database: Option<String>,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            storage_type: StorageType::StateStore.as_str().to_string(),
            use_cqrs: false,
            projections: None,
            database: None,
            command_model_database: None,
            query_model_database: None,
        }
    }
}

/// The designer model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    #[serde(default)]
    pub aggregate_settings: Vec<AggregateSetting>,
    #[serde(default)]
    pub value_object_settings: Vec<ValueObjectSetting>,
    #[serde(default)]
    pub persistence: PersistenceSettings,
}

/// A complete generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub context: ContextSettings,
    #[serde(default)]
    pub model: ModelSettings,
    /// Extra project-wide options keyed by taxonomy key (`tag`, `useAnnotations`, ...)
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

fn enumerated<T>(key: &str, expected: &'static str, raw: &str) -> Result<ParameterValue, SettingsError>
where
    T: FromStr,
    T::Err: Display,
{
    T::from_str(raw).map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        expected,
        actual: raw.to_string(),
    })?;
    Ok(ParameterValue::enumerated(raw.trim().to_ascii_uppercase()))
}

fn option_value(key: &str, kind: ValueKind, value: &serde_json::Value) -> Result<ParameterValue, SettingsError> {
    use serde_json::Value;
    let invalid = |expected: &'static str| SettingsError::InvalidValue {
        key: key.to_string(),
        expected,
        actual: value.to_string(),
    };
    match (kind, value) {
        (ValueKind::Text, Value::String(s)) => Ok(ParameterValue::text(s.as_str())),
        (ValueKind::Text, Value::Number(n)) => Ok(ParameterValue::text(n.to_string())),
        (ValueKind::Text, _) => Err(invalid("text")),
        (ValueKind::Enumerated, Value::String(s)) => Ok(ParameterValue::enumerated(s.as_str())),
        (ValueKind::Enumerated, _) => Err(invalid("an enumerated name")),
        (ValueKind::Boolean, Value::Bool(b)) => Ok(ParameterValue::Boolean(*b)),
        (ValueKind::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(ParameterValue::Boolean(true)),
            "false" => Ok(ParameterValue::Boolean(false)),
            _ => Err(invalid("a boolean")),
        },
        (ValueKind::Boolean, _) => Err(invalid("a boolean")),
        (ValueKind::Numeric, Value::Number(n)) => {
            n.as_i64().map(ParameterValue::Numeric).ok_or_else(|| invalid("an integer"))
        }
        (ValueKind::Numeric, _) => Err(invalid("an integer")),
    }
}

/// Graph under construction plus the root labels already set
struct Mapper<'t> {
    taxonomy: &'t LabelTaxonomy,
    builder: GraphBuilder,
    set: BTreeSet<Label>,
}

impl<'t> Mapper<'t> {
    fn option(&mut self, label: Label, value: ParameterValue) -> Result<(), SettingsError> {
        if !self.set.insert(label) {
            let key = self
                .taxonomy
                .spec(label)
                .map(|s| s.key.to_string())
                .unwrap_or_else(|| label.to_string());
            return Err(SettingsError::Duplicate(key));
        }
        self.builder.root_node(label, value);
        Ok(())
    }

    fn fields(&mut self, owner: NodeId, label: Label, fields: &[FieldSetting]) -> Result<BTreeMap<String, NodeId>, SettingsError> {
        let mut by_name = BTreeMap::new();
        for field in fields {
            let node = self.builder.relate_value(owner, label, field.name.as_str())?;
            self.builder
                .relate_value(node, Label::FieldType, field.field_type.as_str())?;
            if let Some(collection) = field.collection_type.as_deref().filter(|c| !c.trim().is_empty()) {
                self.builder
                    .relate_value(node, Label::CollectionType, collection)?;
            }
            by_name.insert(field.name.clone(), node);
        }
        Ok(by_name)
    }

    fn aggregate(&mut self, setting: &AggregateSetting) -> Result<(), SettingsError> {
        let name = setting.aggregate_name.as_str();
        if name.trim().is_empty() {
            return Err(SettingsError::Missing("aggregateName".to_string()));
        }
        let aggregate = self.builder.root_node(Label::Aggregate, name);
        let fields = self.fields(aggregate, Label::StateField, &setting.state_fields)?;

        let field = |field_name: &str, key: &str| {
            fields
                .get(field_name)
                .copied()
                .ok_or_else(|| SettingsError::InvalidValue {
                    key: format!("{}.{}", name, key),
                    expected: "a declared state field",
                    actual: field_name.to_string(),
                })
        };

        // Events share the aggregate's field nodes rather than copying them.
        let mut events = BTreeMap::new();
        for event in &setting.events {
            let node = self
                .builder
                .relate_value(aggregate, Label::DomainEvent, event.name.as_str())?;
            for field_name in &event.fields {
                self.builder.relate(node, field(field_name, "events")?)?;
            }
            events.insert(event.name.clone(), node);
        }

        for method in &setting.methods {
            let node = self
                .builder
                .relate_value(aggregate, Label::AggregateMethod, method.name.as_str())?;
            self.builder
                .relate_value(node, Label::FactoryMethod, method.factory)?;
            for parameter in &method.parameters {
                let field_name = parameter.state_field();
                field(field_name, "methods.parameters")?;
                let param = self
                    .builder
                    .relate_value(node, Label::MethodParameter, field_name)?;
                if let Some(mutation) = parameter.collection_mutation() {
                    let value = enumerated::<CollectionMutation>(
                        "collectionMutation",
                        "a collection mutation",
                        mutation,
                    )?;
                    self.builder
                        .relate_value(param, Label::CollectionMutation, value)?;
                }
            }
            if let Some(event) = method.event.as_deref().and_then(|e| events.get(e)) {
                self.builder.relate(node, *event)?;
            }
        }

        if !setting.api.root_path.is_empty() || !setting.api.routes.is_empty() {
            self.builder
                .relate_value(aggregate, Label::UriRoot, setting.api.root_path.as_str())?;
        }
        for route in &setting.api.routes {
            let signature = self.builder.relate_value(
                aggregate,
                Label::RouteSignature,
                route.aggregate_method.as_str(),
            )?;
            self.builder
                .relate_value(signature, Label::RoutePath, route.path.as_str())?;
            let method = enumerated::<HttpMethod>("httpMethod", "an HTTP method", &route.http_method)?;
            self.builder
                .relate_value(signature, Label::RouteMethod, method)?;
            self.builder.relate_value(
                signature,
                Label::RequireEntityLoading,
                route.require_entity_load,
            )?;
        }
        Ok(())
    }

    fn value_object(&mut self, setting: &ValueObjectSetting) -> Result<(), SettingsError> {
        let node = self
            .builder
            .root_node(Label::ValueObject, setting.name.as_str());
        self.fields(node, Label::ValueObjectField, &setting.fields)?;
        Ok(())
    }
}

impl GenerationSettings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a settings file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text)?,
            _ => Self::from_json(&text)?,
        };
        info!(
            path = %path.display(),
            aggregates = settings.model.aggregate_settings.len(),
            value_objects = settings.model.value_object_settings.len(),
            "Loaded generation settings"
        );
        Ok(settings)
    }

    /// Map the request into a frozen parameter graph.
    pub fn to_graph(&self, taxonomy: &LabelTaxonomy) -> Result<ParameterGraph, SettingsError> {
        if self.context.package.trim().is_empty() {
            return Err(SettingsError::Missing("context.package".to_string()));
        }
        let mut mapper = Mapper {
            taxonomy,
            builder: GraphBuilder::new(),
            set: BTreeSet::new(),
        };

        mapper.option(Label::Package, ParameterValue::text(self.context.package.trim()))?;
        if !self.context.app_name.trim().is_empty() {
            mapper.option(
                Label::ApplicationName,
                ParameterValue::text(self.context.app_name.trim()),
            )?;
        }
        let dialect = self.context.dialect.as_deref().unwrap_or("JAVA");
        mapper.option(
            Label::Dialect,
            enumerated::<Dialect>("dialect", "a dialect", dialect)?,
        )?;

        let persistence = &self.model.persistence;
        mapper.option(
            Label::StorageType,
            enumerated::<StorageType>("storageType", "a storage type", &persistence.storage_type)?,
        )?;
        mapper.option(Label::Cqrs, ParameterValue::Boolean(persistence.use_cqrs))?;
        if let Some(projections) = persistence.projections.as_deref() {
            mapper.option(
                Label::ProjectionType,
                enumerated::<ProjectionType>("projections", "a projection type", projections)?,
            )?;
        }
        for (label, key, value) in [
            (Label::Database, "database", &persistence.database),
            (
                Label::CommandModelDatabase,
                "commandModelDatabase",
                &persistence.command_model_database,
            ),
            (
                Label::QueryModelDatabase,
                "queryModelDatabase",
                &persistence.query_model_database,
            ),
        ] {
            if let Some(raw) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                mapper.option(label, enumerated::<DatabaseType>(key, "a database type", raw)?)?;
            }
        }

        for aggregate in &self.model.aggregate_settings {
            mapper.aggregate(aggregate)?;
        }
        for value_object in &self.model.value_object_settings {
            mapper.value_object(value_object)?;
        }

        if !self.model.aggregate_settings.is_empty() {
            mapper.option(
                Label::DesignerModelJson,
                ParameterValue::text(serde_json::to_string(&self.model)?),
            )?;
        }

        for (key, value) in &self.options {
            let label = taxonomy
                .label_for_key(key)
                .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
            let spec = taxonomy
                .spec(label)
                .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
            if spec.scope != LabelScope::Root {
                return Err(SettingsError::InvalidValue {
                    key: key.clone(),
                    expected: "a project-wide option",
                    actual: value.to_string(),
                });
            }
            mapper.option(label, option_value(key, spec.value_kind, value)?)?;
        }

        debug!(
            options = mapper.set.len(),
            nodes = mapper.builder.len(),
            "Settings mapped"
        );
        Ok(mapper.builder.freeze())
    }
}
