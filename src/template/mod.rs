//! Template-data resolution layer.
//!
//! Resolvers turn graph fragments into [`TemplateData`]: a flat record, the
//! dependents it delegates to and the [`Fold`] rule that merges each rendered
//! dependent back into the parent. Rendering walks the tree bottom-up through
//! the pure [`fold`] reducer, so a parent record is only handed to the renderer
//! once every dependent outcome has been merged in.

pub mod parameters;
pub mod processing;
pub mod render;
pub mod standard;

pub use parameters::{TemplateParameter, TemplateParameters, TemplateValue};
pub use processing::{TemplateDataFactory, TemplateProcessingStep};
pub use render::{JsonRenderer, Renderer};
pub use standard::TemplateStandard;

use crate::codegen::kinds::Dialect;
use crate::error::RenderError;
use serde::Serialize;
use std::path::PathBuf;

/// How a rendered dependent is merged into its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fold {
    /// Outcome is dropped
    Discard,
    /// Outcome is appended to the parent's list under this key
    AppendTo(TemplateParameter),
}

/// A resolved, not yet rendered, artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub standard: TemplateStandard,
    /// Generation unit the artifact belongs to (aggregate, value object, ...)
    pub name: String,
    pub template: String,
    pub filename: String,
    pub path: Option<PathBuf>,
    pub parameters: TemplateParameters,
    pub dependents: Vec<TemplateData>,
    pub fold: Fold,
}

impl TemplateData {
    pub fn new(
        standard: TemplateStandard,
        name: impl Into<String>,
        template: impl Into<String>,
        parameters: TemplateParameters,
    ) -> Self {
        Self {
            standard,
            name: name.into(),
            template: template.into(),
            filename: String::new(),
            path: None,
            parameters,
            dependents: Vec::new(),
            fold: Fold::Discard,
        }
    }

    /// Give the artifact a file name and target path.
    pub fn placed(mut self, dialect: Dialect, package: Option<&str>) -> Self {
        let filename = self
            .standard
            .resolve_filename(&self.classname(), dialect);
        self.path = Some(self.standard.resolve_path(dialect, package, &filename));
        self.filename = filename;
        self
    }

    pub fn depend_on(mut self, dependents: Vec<TemplateData>, fold: Fold) -> Self {
        self.dependents = dependents;
        self.fold = fold;
        self
    }

    pub fn classname(&self) -> String {
        self.standard.resolve_classname(&self.name)
    }
}

/// Merge one rendered dependent into a parent record.
pub fn fold(mut parameters: TemplateParameters, rule: Fold, outcome: String) -> TemplateParameters {
    match rule {
        Fold::Discard => parameters,
        Fold::AppendTo(key) => {
            parameters.push_text(key, outcome);
            parameters
        }
    }
}

/// Render a template-data tree: dependents first, folded into the parent,
/// then the parent itself.
pub fn render_tree(data: &TemplateData, renderer: &dyn Renderer) -> Result<String, RenderError> {
    let mut parameters = data.parameters.clone();
    for dependent in &data.dependents {
        let outcome = render_tree(dependent, renderer)?;
        parameters = fold(parameters, data.fold, outcome);
    }
    renderer.render(&data.template, &parameters)
}
