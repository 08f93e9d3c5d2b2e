//! Execution context: the per-request state a pipeline threads through its steps.
//!
//! A context owns one frozen [`ParameterGraph`], the ordered content registry,
//! a flat property bag, the command buffer and a named output map. Status moves
//! monotonically `Pending -> Running -> {Completed, Failed}`; the driver is the
//! only writer of status and failure.

pub mod content;

pub use content::{Content, ContentRegistry};

use crate::catalog::Catalog;
use crate::error::{ContentError, ContextError, StepError, StepExecutionError};
use crate::graph::ParameterGraph;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lifecycle state of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Whether `self -> to` is a legal forward move.
    pub fn can_transition_to(&self, to: TaskStatus) -> bool {
        matches!(
            (self, to),
            (TaskStatus::Pending, TaskStatus::Running)
                | (TaskStatus::Running, TaskStatus::Completed)
                | (TaskStatus::Running, TaskStatus::Failed)
        )
    }
}

/// A named output entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Output {
    Text(String),
    Bytes(Vec<u8>),
}

impl Output {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(s) => Some(s),
            Output::Bytes(_) => None,
        }
    }
}

/// Result of a completed run, detached from its context
#[derive(Debug, Clone, Serialize)]
pub struct GenerationBundle {
    pub contents: Vec<Content>,
    pub commands: Vec<String>,
    pub outputs: BTreeMap<String, Output>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
}

/// Per-request mutable state
#[derive(Debug)]
pub struct ExecutionContext {
    catalog: Arc<Catalog>,
    graph: ParameterGraph,
    contents: ContentRegistry,
    status: TaskStatus,
    failure: Option<StepExecutionError>,
    properties: BTreeMap<String, String>,
    commands: Vec<String>,
    outputs: BTreeMap<String, Output>,
    started_at: Option<String>,
    finished_at: Option<String>,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ExecutionContext {
    pub fn new(catalog: Arc<Catalog>, graph: ParameterGraph) -> Self {
        Self {
            catalog,
            graph,
            contents: ContentRegistry::new(),
            status: TaskStatus::Pending,
            failure: None,
            properties: BTreeMap::new(),
            commands: Vec::new(),
            outputs: BTreeMap::new(),
            started_at: None,
            finished_at: None,
        }
    }

    /// A context carrying only properties, for command-resolving pipelines.
    pub fn with_properties<I, K, V>(catalog: Arc<Catalog>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut context = Self::new(catalog, ParameterGraph::empty());
        for (key, value) in properties {
            context.set_property(key, value);
        }
        context
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn graph(&self) -> &ParameterGraph {
        &self.graph
    }

    pub fn contents(&self) -> &ContentRegistry {
        &self.contents
    }

    pub fn add_content(&mut self, content: Content) -> Result<(), ContentError> {
        self.contents.add(content)
    }

    /// Register a step's artifacts together; on error nothing is registered.
    pub fn add_contents(&mut self, batch: Vec<Content>) -> Result<(), ContentError> {
        self.contents.add_all(batch)
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn failure(&self) -> Option<&StepExecutionError> {
        self.failure.as_ref()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Property value, failing the calling step when absent or blank.
    pub fn require_property(&self, key: &str) -> Result<&str, StepError> {
        self.property(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| StepError::MissingProperty(key.to_string()))
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn push_command(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    pub fn outputs(&self) -> &BTreeMap<String, Output> {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    pub fn put_output(&mut self, name: impl Into<String>, output: Output) {
        self.outputs.insert(name.into(), output);
    }

    pub fn started_at(&self) -> Option<&str> {
        self.started_at.as_deref()
    }

    pub fn finished_at(&self) -> Option<&str> {
        self.finished_at.as_deref()
    }

    pub(crate) fn transition(&mut self, to: TaskStatus) -> Result<(), ContextError> {
        if !self.status.can_transition_to(to) {
            return Err(ContextError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        match to {
            TaskStatus::Running => self.started_at = Some(timestamp()),
            TaskStatus::Completed | TaskStatus::Failed => self.finished_at = Some(timestamp()),
            TaskStatus::Pending => {}
        }
        self.status = to;
        Ok(())
    }

    pub(crate) fn fail(&mut self, failure: StepExecutionError) -> Result<(), ContextError> {
        self.transition(TaskStatus::Failed)?;
        self.failure = Some(failure);
        Ok(())
    }

    /// Detach the results of a completed run. Pending, running and failed
    /// contexts are refused.
    pub fn into_bundle(self) -> Result<GenerationBundle, ContextError> {
        if self.status != TaskStatus::Completed {
            return Err(ContextError::Incomplete(self.status));
        }
        Ok(GenerationBundle {
            contents: self.contents.into_vec(),
            commands: self.commands,
            outputs: self.outputs,
            started_at: self.started_at,
            finished_at: self.finished_at,
        })
    }
}
