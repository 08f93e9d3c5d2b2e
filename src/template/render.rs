//! Rendering seam.
//!
//! The textual template engine is an external collaborator: it receives a
//! template id and a flat record and returns text. [`JsonRenderer`] is the
//! built-in implementation; it dumps the record under its template id.

use crate::error::RenderError;
use crate::template::parameters::TemplateParameters;
use serde::Serialize;
use std::collections::BTreeSet;

/// Turns a flat record into text for a named template
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, parameters: &TemplateParameters) -> Result<String, RenderError>;
}

#[derive(Serialize)]
struct Rendered<'a> {
    template: &'a str,
    parameters: &'a TemplateParameters,
}

/// Deterministic pretty-JSON renderer
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    /// Restricts rendering to these template ids when set
    known: Option<BTreeSet<String>>,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that only knows the given template ids.
    pub fn with_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: Some(templates.into_iter().map(Into::into).collect()),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, parameters: &TemplateParameters) -> Result<String, RenderError> {
        if let Some(known) = &self.known {
            if !known.contains(template) {
                return Err(RenderError::TemplateNotFound(template.to_string()));
            }
        }
        serde_json::to_string_pretty(&Rendered {
            template,
            parameters,
        })
        .map_err(|e| RenderError::Failed {
            template: template.to_string(),
            message: e.to_string(),
        })
    }
}
