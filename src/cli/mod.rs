mod commands;
mod output;

pub use commands::{print_completions, Cli, Commands, ConfigAction, OutputFormat};
pub use output::*;
