//! The generic "resolve, render, register" step.

use crate::context::{Content, ExecutionContext};
use crate::error::StepError;
use crate::pipeline::Step;
use crate::template::render::Renderer;
use crate::template::{render_tree, TemplateData};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolves the template data one generation step renders
pub trait TemplateDataFactory: Send + Sync {
    fn name(&self) -> &'static str;

    fn should_process(&self, _context: &ExecutionContext) -> bool {
        true
    }

    fn build(&self, context: &ExecutionContext) -> Result<Vec<TemplateData>, StepError>;
}

/// Step that resolves every record up front, renders them all, then registers
/// the batch as content
pub struct TemplateProcessingStep<F> {
    factory: F,
    renderer: Arc<dyn Renderer>,
}

impl<F: TemplateDataFactory> TemplateProcessingStep<F> {
    pub fn new(factory: F, renderer: Arc<dyn Renderer>) -> Self {
        Self { factory, renderer }
    }
}

impl<F: TemplateDataFactory> Step for TemplateProcessingStep<F> {
    fn name(&self) -> &str {
        self.factory.name()
    }

    fn should_process(&self, context: &ExecutionContext) -> bool {
        self.factory.should_process(context)
    }

    fn process(&self, context: &mut ExecutionContext) -> Result<(), StepError> {
        let resolved = self.factory.build(context)?;

        for data in &resolved {
            if !context.catalog().supports(data.standard) {
                return Err(StepError::Invalid(format!(
                    "template standard {} is not registered",
                    data.standard
                )));
            }
        }

        // Nothing is registered until every record has rendered.
        let mut rendered = Vec::with_capacity(resolved.len());
        for data in resolved {
            let text = render_tree(&data, self.renderer.as_ref())?;
            let path = data
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(&data.filename));
            debug!(
                standard = %data.standard,
                name = %data.name,
                path = %path.display(),
                "Content rendered"
            );
            rendered.push(Content::new(data.standard, data.classname(), text, path));
        }
        context.add_contents(rendered)?;
        Ok(())
    }
}
