//! Step pipeline: the step contract, the fail-fast driver and the named task
//! pipelines built from them.

pub mod commands;
pub mod driver;
pub mod step;
pub mod task;

pub use commands::{
    ArchetypeCommandResolverStep, BrowserLaunchCommandResolverStep, CommandResolver, CommandResolverStep,
    DockerPackageCommandResolverStep, Terminal,
};
pub use driver::{Pipeline, PipelineBuilder};
pub use step::Step;
pub use task::Task;
