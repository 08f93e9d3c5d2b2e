//! Enumerated generation options.
//!
//! Each enum parses from its settings spelling (`FromStr`) and is readable
//! straight off a node through [`FromParameter`].

use crate::graph::{parse_enumerated, FromParameter, ParameterValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! enumerated_parameter {
    ($ty:ty, $target:literal) => {
        impl FromParameter for $ty {
            const TARGET: &'static str = $target;

            fn from_parameter(value: &ParameterValue) -> Result<Self, String> {
                parse_enumerated(value)
            }
        }
    };
}

fn unknown(kind: &str, raw: &str) -> String {
    format!("unknown {} '{}'", kind, raw)
}

/// Persistence mechanism of the command model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    ObjectStore,
    StateStore,
    Journal,
}

impl StorageType {
    pub const ALL: [StorageType; 3] = [
        StorageType::ObjectStore,
        StorageType::StateStore,
        StorageType::Journal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::ObjectStore => "OBJECT_STORE",
            StorageType::StateStore => "STATE_STORE",
            StorageType::Journal => "JOURNAL",
        }
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OBJECT_STORE" => Ok(StorageType::ObjectStore),
            "STATE_STORE" => Ok(StorageType::StateStore),
            "JOURNAL" => Ok(StorageType::Journal),
            _ => Err(unknown("storage type", s)),
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(StorageType, "storage type");

/// Target language of generated sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dialect {
    Java,
    Kotlin,
    #[serde(rename = "C_SHARP")]
    CSharp,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Java => "JAVA",
            Dialect::Kotlin => "KOTLIN",
            Dialect::CSharp => "C_SHARP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Kotlin => "kt",
            Dialect::CSharp => "cs",
        }
    }

    pub fn source_root(&self) -> &'static str {
        match self {
            Dialect::Java => "src/main/java",
            Dialect::Kotlin => "src/main/kotlin",
            Dialect::CSharp => "src",
        }
    }

    pub fn test_root(&self) -> &'static str {
        match self {
            Dialect::Java => "src/test/java",
            Dialect::Kotlin => "src/test/kotlin",
            Dialect::CSharp => "test",
        }
    }

    pub fn resource_root(&self) -> &'static str {
        match self {
            Dialect::CSharp => "resources",
            Dialect::Java | Dialect::Kotlin => "src/main/resources",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JAVA" => Ok(Dialect::Java),
            "KOTLIN" => Ok(Dialect::Kotlin),
            "C_SHARP" | "CSHARP" | "C#" => Ok(Dialect::CSharp),
            _ => Err(unknown("dialect", s)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(Dialect, "dialect");

/// Query-model projection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionType {
    None,
    EventBased,
    OperationBased,
}

impl ProjectionType {
    pub fn is_projection_enabled(&self) -> bool {
        !matches!(self, ProjectionType::None)
    }

    pub fn is_operation_based(&self) -> bool {
        matches!(self, ProjectionType::OperationBased)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionType::None => "NONE",
            ProjectionType::EventBased => "EVENT_BASED",
            ProjectionType::OperationBased => "OPERATION_BASED",
        }
    }

    /// Template id used to render projections of this kind.
    pub fn template(&self) -> Option<&'static str> {
        match self {
            ProjectionType::None => None,
            ProjectionType::EventBased => Some("EventBasedProjection"),
            ProjectionType::OperationBased => Some("OperationBasedProjection"),
        }
    }
}

impl FromStr for ProjectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "" => Ok(ProjectionType::None),
            "EVENT_BASED" => Ok(ProjectionType::EventBased),
            "OPERATION_BASED" => Ok(ProjectionType::OperationBased),
            _ => Err(unknown("projection type", s)),
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(ProjectionType, "projection type");

/// Database backing a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseType {
    InMemory,
    Postgres,
    #[serde(rename = "MYSQL")]
    MySql,
    #[serde(rename = "HSQLDB")]
    HsqlDb,
    #[serde(rename = "YUGA_BYTE")]
    YugaByte,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::InMemory => "IN_MEMORY",
            DatabaseType::Postgres => "POSTGRES",
            DatabaseType::MySql => "MYSQL",
            DatabaseType::HsqlDb => "HSQLDB",
            DatabaseType::YugaByte => "YUGA_BYTE",
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self, DatabaseType::InMemory)
    }

    /// JDBC driver class, absent for in-memory stores.
    pub fn driver(&self) -> Option<&'static str> {
        match self {
            DatabaseType::InMemory => None,
            DatabaseType::Postgres | DatabaseType::YugaByte => Some("org.postgresql.Driver"),
            DatabaseType::MySql => Some("com.mysql.cj.jdbc.Driver"),
            DatabaseType::HsqlDb => Some("org.hsqldb.jdbc.JDBCDriver"),
        }
    }

    /// Connection url for an application's database.
    pub fn url(&self, app_name: &str) -> Option<String> {
        match self {
            DatabaseType::InMemory => None,
            DatabaseType::Postgres => Some(format!("jdbc:postgresql://localhost/{}", app_name)),
            DatabaseType::YugaByte => {
                Some(format!("jdbc:postgresql://localhost:5433/{}", app_name))
            }
            DatabaseType::MySql => Some(format!("jdbc:mysql://localhost/{}", app_name)),
            DatabaseType::HsqlDb => Some(format!("jdbc:hsqldb:mem:{}", app_name)),
        }
    }
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN_MEMORY" => Ok(DatabaseType::InMemory),
            "POSTGRES" | "POSTGRESQL" => Ok(DatabaseType::Postgres),
            "MYSQL" => Ok(DatabaseType::MySql),
            "HSQLDB" => Ok(DatabaseType::HsqlDb),
            "YUGA_BYTE" | "YUGABYTE" => Ok(DatabaseType::YugaByte),
            _ => Err(unknown("database type", s)),
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(DatabaseType, "database type");

/// How a method parameter changes a collection field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionMutation {
    None,
    Addition,
    Removal,
    Replacement,
    Merge,
}

impl CollectionMutation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionMutation::None => "NONE",
            CollectionMutation::Addition => "ADDITION",
            CollectionMutation::Removal => "REMOVAL",
            CollectionMutation::Replacement => "REPLACEMENT",
            CollectionMutation::Merge => "MERGE",
        }
    }

    /// Additions and removals take one element rather than a whole collection.
    pub fn is_single_parameter_based(&self) -> bool {
        matches!(self, CollectionMutation::Addition | CollectionMutation::Removal)
    }
}

impl FromStr for CollectionMutation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "" => Ok(CollectionMutation::None),
            "ADDITION" => Ok(CollectionMutation::Addition),
            "REMOVAL" => Ok(CollectionMutation::Removal),
            "REPLACEMENT" => Ok(CollectionMutation::Replacement),
            "MERGE" => Ok(CollectionMutation::Merge),
            _ => Err(unknown("collection mutation", s)),
        }
    }
}

impl fmt::Display for CollectionMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(CollectionMutation, "collection mutation");

/// HTTP method of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(unknown("http method", s)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(HttpMethod, "http method");

/// Deployment target; selects the archetype a project is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Deployment {
    None,
    Docker,
    Kubernetes,
}

impl Deployment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deployment::None => "NONE",
            Deployment::Docker => "DOCKER",
            Deployment::Kubernetes => "KUBERNETES",
        }
    }

    /// Archetype name, as in `{name}-archetype`.
    pub fn archetype(&self) -> &'static str {
        match self {
            Deployment::None => "basic",
            Deployment::Docker => "docker",
            Deployment::Kubernetes => "kubernetes",
        }
    }

    pub fn uses_docker(&self) -> bool {
        !matches!(self, Deployment::None)
    }

    pub fn uses_kubernetes(&self) -> bool {
        matches!(self, Deployment::Kubernetes)
    }
}

impl FromStr for Deployment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "" => Ok(Deployment::None),
            "DOCKER" => Ok(Deployment::Docker),
            "KUBERNETES" | "K8S" => Ok(Deployment::Kubernetes),
            _ => Err(unknown("deployment", s)),
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enumerated_parameter!(Deployment, "deployment");

/// Side of a CQRS split
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelKind {
    Command,
    Query,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Command => "COMMAND",
            ModelKind::Query => "QUERY",
        }
    }

    /// Class-name prefix for per-model artifacts.
    pub fn prefix(&self) -> &'static str {
        match self {
            ModelKind::Command => "CommandModel",
            ModelKind::Query => "QueryModel",
        }
    }

    pub fn is_query_model(&self) -> bool {
        matches!(self, ModelKind::Query)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
