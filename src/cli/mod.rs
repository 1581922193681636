// CLI module
// Command-line arguments and the interactive console

mod args;
mod console;

pub use args::{CliArgs, EngineType};
pub use console::Console;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, or --help), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
