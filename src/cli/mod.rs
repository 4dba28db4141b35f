//! Command-line interface components
//!
//! This module contains CLI-specific code for the manifest tool:
//! argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, ConfigAction, ConfigArgs, ExportArgs, GlobalArgs, ListArgs,
    ShowArgs,
};
pub use commands::{
    handle_check, handle_config, handle_export, handle_list, handle_show, handle_summary,
    CommandContext,
};
