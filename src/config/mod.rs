//! Configuration surface of the crate

mod cli;

pub use cli::{
    parse_args, AggregateArgs, Cli, Command, EvaluateArgs, InspectArgs, OutputFormat, VotingArgs,
};
