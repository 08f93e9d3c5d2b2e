//! Driver behaviour: ordering, skips, fail-fast and status monotonicity.

use super::test_utils::author_settings;
use modelgen::catalog::Catalog;
use modelgen::context::{Content, ExecutionContext, TaskStatus};
use modelgen::error::{ContextError, RenderError, StepError};
use modelgen::graph::ParameterGraph;
use modelgen::pipeline::{Pipeline, Step, Task};
use modelgen::template::{JsonRenderer, TemplateStandard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy)]
enum Behaviour {
    Produce,
    Skip,
    Fail,
}

struct Recording {
    name: &'static str,
    behaviour: Behaviour,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Step for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn should_process(&self, _context: &ExecutionContext) -> bool {
        !matches!(self.behaviour, Behaviour::Skip)
    }

    fn process(&self, context: &mut ExecutionContext) -> Result<(), StepError> {
        self.log.lock().unwrap().push(self.name);
        match self.behaviour {
            Behaviour::Fail => Err(StepError::Invalid(format!("{} refused", self.name))),
            _ => {
                context.add_content(Content::new(
                    TemplateStandard::ValueObject,
                    self.name,
                    "text",
                    format!("{}.java", self.name),
                ))?;
                Ok(())
            }
        }
    }
}

fn pipeline(steps: &[(&'static str, Behaviour)], log: &Arc<Mutex<Vec<&'static str>>>) -> Pipeline {
    steps
        .iter()
        .fold(Pipeline::builder("test"), |builder, (name, behaviour)| {
            builder.step(Recording {
                name: *name,
                behaviour: *behaviour,
                log: Arc::clone(log),
            })
        })
        .build()
}

fn context() -> ExecutionContext {
    ExecutionContext::new(Catalog::shared(), ParameterGraph::empty())
}

#[test]
fn steps_run_in_order_and_skips_are_not_failures() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pipeline = pipeline(
        &[
            ("first", Behaviour::Produce),
            ("skipped", Behaviour::Skip),
            ("last", Behaviour::Produce),
        ],
        &log,
    );
    let mut ctx = context();
    pipeline.run(&mut ctx).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "last"]);
    assert_eq!(ctx.status(), TaskStatus::Completed);
    assert!(ctx.started_at().is_some());
    assert!(ctx.finished_at().is_some());

    let bundle = ctx.into_bundle().unwrap();
    let names: Vec<&str> = bundle.contents.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["first", "last"]);
}

#[test]
fn failure_stops_the_run_and_keeps_earlier_content() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pipeline = pipeline(
        &[
            ("a", Behaviour::Produce),
            ("b", Behaviour::Skip),
            ("c", Behaviour::Fail),
            ("d", Behaviour::Produce),
        ],
        &log,
    );
    let mut ctx = context();
    let err = pipeline.run(&mut ctx).unwrap_err();

    assert_eq!(err.pipeline, "test");
    assert_eq!(err.step, "c");
    assert_eq!(err.index, 2);
    assert!(err.cause.contains("c refused"));
    assert_eq!(*log.lock().unwrap(), vec!["a", "c"]);

    assert_eq!(ctx.status(), TaskStatus::Failed);
    assert_eq!(ctx.contents().len(), 1);
    let failure = ctx.failure().unwrap();
    assert_eq!(failure.step, "c");
    assert!(matches!(failure.source, StepError::Invalid(_)));

    assert!(matches!(
        ctx.into_bundle(),
        Err(ContextError::Incomplete(TaskStatus::Failed))
    ));
}

#[test]
fn second_of_four_steps_failing_keeps_only_the_first_steps_content() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pipeline = pipeline(
        &[
            ("s1", Behaviour::Produce),
            ("s2", Behaviour::Fail),
            ("s3", Behaviour::Produce),
            ("s4", Behaviour::Produce),
        ],
        &log,
    );
    let mut ctx = context();
    let err = pipeline.run(&mut ctx).unwrap_err();

    assert_eq!(err.step, "s2");
    assert_eq!(err.index, 1);
    assert_eq!(*log.lock().unwrap(), vec!["s1", "s2"]);
    assert_eq!(ctx.status(), TaskStatus::Failed);
    let names: Vec<&str> = ctx.contents().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["s1"]);
}

#[test]
fn template_step_failing_midway_registers_none_of_its_artifacts() {
    // The state renders, its adapter does not.
    let renderer = JsonRenderer::with_templates(["ValueObject", "StateObject", "AggregateStateMethod"]);
    let settings = author_settings("STATE_STORE", false);
    let catalog = Catalog::shared();
    let graph = settings.to_graph(&catalog.taxonomy).unwrap();
    let mut ctx = ExecutionContext::new(catalog, graph);

    let err = Task::ProjectGeneration
        .pipeline(Arc::new(renderer))
        .run(&mut ctx)
        .unwrap_err();

    assert_eq!(err.step, "model_generation");
    assert_eq!(err.index, 1);
    assert_eq!(ctx.status(), TaskStatus::Failed);
    assert!(matches!(
        ctx.failure().map(|f| &f.source),
        Some(StepError::Render(RenderError::TemplateNotFound(t))) if t == "StateAdapter"
    ));

    assert!(!ctx.contents().contains_kind(TemplateStandard::AggregateState));
    assert!(!ctx.contents().contains_kind(TemplateStandard::StateAdapter));
    let value_objects: Vec<&str> = ctx
        .contents()
        .of_kind(TemplateStandard::ValueObject)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(value_objects, vec!["Name", "Rank"]);
    assert_eq!(ctx.contents().len(), 2);
}

#[test]
fn finished_contexts_are_not_rerun() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let failing = pipeline(&[("boom", Behaviour::Fail)], &log);
    let mut ctx = context();
    let first = failing.run(&mut ctx).unwrap_err();
    let second = failing.run(&mut ctx).unwrap_err();
    assert_eq!(first.step, second.step);
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(ctx.status(), TaskStatus::Failed);

    let calls = Arc::new(AtomicUsize::new(0));
    struct Counting(Arc<AtomicUsize>);
    impl Step for Counting {
        fn name(&self) -> &str {
            "counting"
        }
        fn process(&self, _context: &mut ExecutionContext) -> Result<(), StepError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
    let counting = Pipeline::builder("counting")
        .step(Counting(Arc::clone(&calls)))
        .build();
    let mut ctx = context();
    counting.run(&mut ctx).unwrap();
    counting.run(&mut ctx).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.status(), TaskStatus::Completed);
}

#[test]
fn pending_context_has_no_bundle() {
    assert!(matches!(
        context().into_bundle(),
        Err(ContextError::Incomplete(TaskStatus::Pending))
    ));
}
