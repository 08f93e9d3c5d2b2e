//! modelgen: deterministic source generation from labeled domain-model
//! parameter graphs.
//!
//! A request is mapped into a frozen [`graph::ParameterGraph`], then a
//! [`pipeline::Pipeline`] of steps resolves template data from it, renders
//! each artifact and collects the results in an [`context::ExecutionContext`].

pub mod catalog;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod label;
pub mod logging;
pub mod pipeline;
pub mod settings;
pub mod template;
