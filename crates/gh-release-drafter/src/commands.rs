//! The three pipeline stages exposed as subcommands

pub mod process;
pub mod publish;
pub mod query;
