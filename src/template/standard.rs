//! Template standards: the kinds of artifact the engine can produce and how each
//! names, packages and places its files.

use crate::codegen::kinds::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStandard {
    AggregateState,
    AggregateStateMethod,
    StateAdapter,
    ValueObject,
    DataObject,
    Projection,
    StoreProvider,
    DatabaseProperties,
    RestResourceUnitTest,
    EntityUnitTest,
    DesignerModel,
}

impl TemplateStandard {
    pub const ALL: [TemplateStandard; 11] = [
        TemplateStandard::AggregateState,
        TemplateStandard::AggregateStateMethod,
        TemplateStandard::StateAdapter,
        TemplateStandard::ValueObject,
        TemplateStandard::DataObject,
        TemplateStandard::Projection,
        TemplateStandard::StoreProvider,
        TemplateStandard::DatabaseProperties,
        TemplateStandard::RestResourceUnitTest,
        TemplateStandard::EntityUnitTest,
        TemplateStandard::DesignerModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStandard::AggregateState => "AGGREGATE_STATE",
            TemplateStandard::AggregateStateMethod => "AGGREGATE_STATE_METHOD",
            TemplateStandard::StateAdapter => "STATE_ADAPTER",
            TemplateStandard::ValueObject => "VALUE_OBJECT",
            TemplateStandard::DataObject => "DATA_OBJECT",
            TemplateStandard::Projection => "PROJECTION",
            TemplateStandard::StoreProvider => "STORE_PROVIDER",
            TemplateStandard::DatabaseProperties => "DATABASE_PROPERTIES",
            TemplateStandard::RestResourceUnitTest => "REST_RESOURCE_UNIT_TEST",
            TemplateStandard::EntityUnitTest => "ENTITY_UNIT_TEST",
            TemplateStandard::DesignerModel => "DESIGNER_MODEL",
        }
    }

    /// Class (or resource base) name for a generation unit.
    pub fn resolve_classname(&self, unit: &str) -> String {
        match self {
            TemplateStandard::AggregateState => format!("{}State", unit),
            TemplateStandard::StateAdapter => format!("{}Adapter", unit),
            TemplateStandard::DataObject => format!("{}Data", unit),
            TemplateStandard::Projection => format!("{}ProjectionActor", unit),
            TemplateStandard::RestResourceUnitTest => format!("{}ResourceTest", unit),
            TemplateStandard::EntityUnitTest => format!("{}EntityTest", unit),
            TemplateStandard::DatabaseProperties => "database".to_string(),
            TemplateStandard::DesignerModel => format!("{}-designer-model", unit),
            TemplateStandard::AggregateStateMethod
            | TemplateStandard::ValueObject
            | TemplateStandard::StoreProvider => unit.to_string(),
        }
    }

    /// File name including extension.
    pub fn resolve_filename(&self, classname: &str, dialect: Dialect) -> String {
        match self {
            TemplateStandard::DatabaseProperties => format!("{}.properties", classname),
            TemplateStandard::DesignerModel => format!("{}.json", classname),
            _ => format!("{}.{}", classname, dialect.extension()),
        }
    }

    /// Package a unit's artifact lives in, or `None` for plain resources.
    pub fn resolve_package(&self, base_package: &str, unit: &str) -> Option<String> {
        match self {
            TemplateStandard::AggregateState | TemplateStandard::EntityUnitTest => {
                Some(format!("{}.model.{}", base_package, unit.to_lowercase()))
            }
            TemplateStandard::ValueObject => Some(format!("{}.model", base_package)),
            TemplateStandard::DataObject => Some(format!("{}.infrastructure", base_package)),
            TemplateStandard::StateAdapter
            | TemplateStandard::Projection
            | TemplateStandard::StoreProvider => {
                Some(format!("{}.infrastructure.persistence", base_package))
            }
            TemplateStandard::RestResourceUnitTest => {
                Some(format!("{}.infrastructure.resource", base_package))
            }
            TemplateStandard::AggregateStateMethod
            | TemplateStandard::DatabaseProperties
            | TemplateStandard::DesignerModel => None,
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(
            self,
            TemplateStandard::RestResourceUnitTest | TemplateStandard::EntityUnitTest
        )
    }

    pub fn is_resource(&self) -> bool {
        matches!(
            self,
            TemplateStandard::DatabaseProperties | TemplateStandard::DesignerModel
        )
    }

    /// Relative target path of an artifact.
    pub fn resolve_path(&self, dialect: Dialect, package: Option<&str>, filename: &str) -> PathBuf {
        let root = if self.is_resource() {
            dialect.resource_root()
        } else if self.is_test() {
            dialect.test_root()
        } else {
            dialect.source_root()
        };
        let mut path = PathBuf::from(root);
        if let Some(package) = package {
            for segment in package.split('.').filter(|s| !s.is_empty()) {
                path.push(segment);
            }
        }
        path.push(filename);
        path
    }
}

impl fmt::Display for TemplateStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
