//! Error types for the modelgen generation engine.
//!
//! Each layer owns one enum: graph construction, graph queries, the content
//! registry, rendering, steps and the pipeline driver. Query and collaborator
//! failures surface inside a step as [`StepError`]; the driver wraps them into
//! [`StepExecutionError`] and reports the aborted run as [`PipelineAbortedError`].

use crate::graph::NodeId;
use crate::label::Label;
use crate::template::TemplateStandard;
use thiserror::Error;

/// Errors raised while constructing a parameter graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} cannot be related to itself")]
    SelfRelation(NodeId),
}

/// Errors raised by singular lookups and typed coercions over a frozen graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("No {label} node found under {scope}")]
    NodeNotFound { label: Label, scope: String },

    #[error("Expected exactly one {label} node under {scope}, found {count}")]
    AmbiguousNode {
        label: Label,
        scope: String,
        count: usize,
    },

    #[error("Cannot convert {label} value '{value}' to {target}: {reason}")]
    ValueConversion {
        label: Label,
        value: String,
        target: &'static str,
        reason: String,
    },
}

/// Content registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content already registered for {kind} '{name}'")]
    DuplicateContent { kind: TemplateStandard, name: String },
}

/// Failure reported by a rendering collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Rendering {template} failed: {message}")]
    Failed { template: String, message: String },
}

/// Any failure raised inside a step's `process`
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Content rejected: {0}")]
    Content(#[from] ContentError),

    #[error("Missing property: {0}")]
    MissingProperty(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A step failure tagged with the identity of the step that raised it
#[derive(Debug, Error)]
#[error("Step '{step}' (#{index}) failed: {source}")]
pub struct StepExecutionError {
    pub step: String,
    pub index: usize,
    #[source]
    pub source: StepError,
}

/// Caller-visible summary of a run that stopped early
#[derive(Debug, Error)]
#[error("Pipeline '{pipeline}' aborted at step '{step}' (#{index}): {cause}")]
pub struct PipelineAbortedError {
    pub pipeline: String,
    pub step: String,
    pub index: usize,
    pub cause: String,
}

/// Context lifecycle errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crate::context::TaskStatus,
        to: crate::context::TaskStatus,
    },

    #[error("Generation did not complete (status {0:?})")]
    Incomplete(crate::context::TaskStatus),
}

/// Errors raised while mapping raw settings into a parameter graph
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Setting '{key}' expects {expected}, got {actual}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Setting '{0}' is given more than once")]
    Duplicate(String),

    #[error("Graph construction failed: {0}")]
    Graph(#[from] GraphError),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
