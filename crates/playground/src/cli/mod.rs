//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the playground binary.

mod browse;
mod commands;
mod table;

pub use browse::{handle_edit, handle_fields, handle_list, handle_models};
pub use commands::{Cli, Commands, Target};
