//! CLI argument types
//!
//! Configuration is explicit values handed to the library: a `VotingConfig`
//! built from flags, no environment variables, no process-wide state.

mod core;
mod types;

#[cfg(test)]
mod tests;

pub use core::{
    parse_args, AggregateArgs, Cli, Command, EvaluateArgs, InspectArgs, VotingArgs,
};
pub use types::OutputFormat;
