//! Synchronous fail-fast pipeline driver.

use crate::context::{ExecutionContext, TaskStatus};
use crate::error::{PipelineAbortedError, StepExecutionError};
use crate::pipeline::step::Step;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// A named, ordered list of steps
pub struct Pipeline {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every applicable step in order against `context`.
    ///
    /// A context that already reached a terminal status is left untouched. The
    /// first failing step marks the context `Failed`, records the failure on it
    /// and stops the run; content produced by earlier steps is kept.
    #[instrument(skip(self, context), fields(pipeline = %self.name))]
    pub fn run(&self, context: &mut ExecutionContext) -> Result<(), PipelineAbortedError> {
        if context.status().is_terminal() {
            warn!(status = ?context.status(), "Context already finished; no step runs");
            return self.outcome(context);
        }

        let start = Instant::now();
        if let Err(e) = context.transition(TaskStatus::Running) {
            error!("Cannot start pipeline: {}", e);
            return Err(self.aborted("driver", 0, e.to_string()));
        }
        info!(steps = self.steps.len(), "Pipeline started");

        for (index, step) in self.steps.iter().enumerate() {
            if !step.should_process(context) {
                debug!(step = step.name(), index, "Step skipped");
                continue;
            }

            debug!(step = step.name(), index, "Step started");
            if let Err(source) = step.process(context) {
                error!(step = step.name(), index, "Step failed: {}", source);
                let failure = StepExecutionError {
                    step: step.name().to_string(),
                    index,
                    source,
                };
                if let Err(e) = context.fail(failure) {
                    error!("Cannot record failure: {}", e);
                }
                return self.outcome(context);
            }
        }

        if let Err(e) = context.transition(TaskStatus::Completed) {
            error!("Cannot complete pipeline: {}", e);
            return Err(self.aborted("driver", self.steps.len(), e.to_string()));
        }
        info!(
            contents = context.contents().len(),
            commands = context.commands().len(),
            duration_ms = start.elapsed().as_millis(),
            "Pipeline completed"
        );
        Ok(())
    }

    fn outcome(&self, context: &ExecutionContext) -> Result<(), PipelineAbortedError> {
        match (context.status(), context.failure()) {
            (TaskStatus::Failed, Some(failure)) => Err(self.aborted(
                &failure.step,
                failure.index,
                failure.source.to_string(),
            )),
            (TaskStatus::Failed, None) => Err(self.aborted("unknown", 0, "failed".to_string())),
            _ => Ok(()),
        }
    }

    fn aborted(&self, step: &str, index: usize, cause: String) -> PipelineAbortedError {
        PipelineAbortedError {
            pipeline: self.name.clone(),
            step: step.to_string(),
            index,
            cause,
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}

/// Static composition of a pipeline
pub struct PipelineBuilder {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl PipelineBuilder {
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            steps: self.steps,
        }
    }
}
