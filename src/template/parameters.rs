//! Template-data records.
//!
//! A record is a flat ordered mapping from [`TemplateParameter`] keys to
//! [`TemplateValue`]s. Ordered maps and sets keep serialization byte-identical
//! for identical inputs.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Keys of a template-data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateParameter {
    PackageName,
    ApplicationName,
    AggregateProtocolName,
    StateName,
    AdapterName,
    EventSourced,
    StorageType,
    Members,
    MembersAssignment,
    IdType,
    Imports,
    ConstructorParameters,
    MethodInvocationParameters,
    Methods,
    MethodName,
    MethodParameters,
    CollectionMutation,
    SingleParameterMutation,
    FactoryMethod,
    ValueObjectName,
    ValueObjectFields,
    DataObjectName,
    ProjectionName,
    ProjectionType,
    #[serde(rename = "sources")]
    ProjectionSources,
    StoreProviderName,
    StoreActor,
    Model,
    #[serde(rename = "useCQRS")]
    UseCqrs,
    #[serde(rename = "databases")]
    DatabaseParameters,
    DatabaseType,
    #[serde(rename = "driver")]
    DatabaseDriver,
    #[serde(rename = "url")]
    DatabaseUrl,
    ResourceFile,
    ProductionCode,
    #[serde(rename = "resourceUnitTestName")]
    RestResourceUnitTestName,
    UriRoot,
    TestCases,
    RootMethod,
    IsRootMethod,
    RootPath,
    Disabled,
    SelfDescribingEvents,
    RequireEntityLoading,
    UseAnnotations,
    UseAutoDispatch,
    DispatcherName,
    #[serde(rename = "entityCreationMethod")]
    EntityCreationMethodName,
    DefaultFactoryMethod,
    AggregateProtocolVariable,
    EntityUnitTestName,
    EntityName,
    EntityTemplate,
    SourcedEvents,
    DomainEventName,
    UnitTest,
    #[serde(rename = "designerModelJson")]
    DesignerModelJson,
}

/// A record value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Text(String),
    Flag(bool),
    Texts(Vec<String>),
    Records(Vec<TemplateParameters>),
    Imports(BTreeSet<String>),
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Flag(value)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(value: Vec<String>) -> Self {
        TemplateValue::Texts(value)
    }
}

impl From<Vec<TemplateParameters>> for TemplateValue {
    fn from(value: Vec<TemplateParameters>) -> Self {
        TemplateValue::Records(value)
    }
}

/// Flat renderable record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParameters {
    values: BTreeMap<TemplateParameter, TemplateValue>,
}

impl TemplateParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: TemplateParameter, value: impl Into<TemplateValue>) -> Self {
        Self::new().and(key, value)
    }

    /// Set `key`, replacing any previous value.
    pub fn and(mut self, key: TemplateParameter, value: impl Into<TemplateValue>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    /// Add one import identifier; blank identifiers are ignored.
    pub fn add_import(mut self, import: impl AsRef<str>) -> Self {
        self.insert_imports(std::iter::once(import.as_ref().to_string()));
        self
    }

    pub fn add_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_imports(imports.into_iter().map(Into::into));
        self
    }

    fn insert_imports(&mut self, imports: impl Iterator<Item = String>) {
        let entry = self
            .values
            .entry(TemplateParameter::Imports)
            .or_insert_with(|| TemplateValue::Imports(BTreeSet::new()));
        if let TemplateValue::Imports(set) = entry {
            set.extend(imports.filter(|i| !i.trim().is_empty()));
        }
    }

    /// Append a text to a list-valued key, creating the list when absent.
    pub fn push_text(&mut self, key: TemplateParameter, text: String) {
        match self.values.get_mut(&key) {
            Some(TemplateValue::Texts(list)) => list.push(text),
            _ => {
                self.values.insert(key, TemplateValue::Texts(vec![text]));
            }
        }
    }

    pub fn find(&self, key: TemplateParameter) -> Option<&TemplateValue> {
        self.values.get(&key)
    }

    pub fn has(&self, key: TemplateParameter) -> bool {
        self.values.contains_key(&key)
    }

    pub fn text(&self, key: TemplateParameter) -> Option<&str> {
        match self.values.get(&key) {
            Some(TemplateValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, key: TemplateParameter) -> Option<bool> {
        match self.values.get(&key) {
            Some(TemplateValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn texts(&self, key: TemplateParameter) -> &[String] {
        match self.values.get(&key) {
            Some(TemplateValue::Texts(list)) => list,
            _ => &[],
        }
    }

    pub fn records(&self, key: TemplateParameter) -> &[TemplateParameters] {
        match self.values.get(&key) {
            Some(TemplateValue::Records(list)) => list,
            _ => &[],
        }
    }

    /// Import identifiers collected so far (empty when none were added).
    pub fn imports(&self) -> Vec<&str> {
        match self.values.get(&TemplateParameter::Imports) {
            Some(TemplateValue::Imports(set)) => set.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical JSON encoding of the record.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// BLAKE3 fingerprint of the canonical encoding, hex encoded.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = self.to_canonical_json()?;
        Ok(hex::encode(blake3::hash(&bytes).as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_skip_blanks_and_dedupe() {
        let params = TemplateParameters::new()
            .add_import("java.util.List")
            .add_import("")
            .add_imports(vec!["java.util.List", "java.time.LocalDate"]);
        assert_eq!(params.imports(), vec!["java.time.LocalDate", "java.util.List"]);
    }

    #[test]
    fn push_text_appends_in_order() {
        let mut params = TemplateParameters::with(TemplateParameter::Methods, Vec::<String>::new());
        params.push_text(TemplateParameter::Methods, "first".to_string());
        params.push_text(TemplateParameter::Methods, "second".to_string());
        assert_eq!(params.texts(TemplateParameter::Methods), ["first", "second"]);
    }

    #[test]
    fn serializes_with_template_keys() {
        let params = TemplateParameters::with(TemplateParameter::UseCqrs, true)
            .and(TemplateParameter::StateName, "AuthorState");
        let json = String::from_utf8(params.to_canonical_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"stateName":"AuthorState","useCQRS":true}"#);
    }

    #[test]
    fn digest_is_stable() {
        let a = TemplateParameters::with(TemplateParameter::IdType, "String");
        let b = TemplateParameters::with(TemplateParameter::IdType, "String");
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
        let c = TemplateParameters::with(TemplateParameter::IdType, "long");
        assert_ne!(a.digest().unwrap(), c.digest().unwrap());
    }
}
