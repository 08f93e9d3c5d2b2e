//! CLI: parse, route and presentation. Routing hands requests to the
//! pipeline tasks and formats what they return.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_commands, format_contents};
pub use route::RunContext;
