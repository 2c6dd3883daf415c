//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! config management and the server runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_server, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ServeArgs};
pub use presenter::Presenter;
