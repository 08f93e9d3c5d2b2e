//! The step contract.

use crate::context::ExecutionContext;
use crate::error::StepError;

/// One synchronous unit of a pipeline
///
/// Steps keep no per-run state; everything a run produces goes through the
/// context. Collaborators such as a renderer are handed over when the step is
/// constructed.
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this step applies to the given context. Skipped steps are not
    /// failures.
    fn should_process(&self, _context: &ExecutionContext) -> bool {
        true
    }

    fn process(&self, context: &mut ExecutionContext) -> Result<(), StepError>;
}
