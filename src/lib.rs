//! treeprompt library
//!
//! Completion and dispatch engine for interactive shells built over a tree
//! of commands. Each keystroke is resolved against the tree to offer
//! subcommands, flags and flag values; each submitted line resets every flag
//! to its default and executes the tree.
//!
//! # Modules
//!
//! - `cli`: Command-line interface of the bundled binary
//! - `command`: Command tree, flags and execution
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `repl`: Interactive shell, completion and dispatch
//!
//! # Example
//!
//! ```no_run
//! use treeprompt::command::{CommandNode, Flag};
//! use treeprompt::repl::{Shell, ShellOptions};
//!
//! fn main() -> treeprompt::Result<()> {
//!     let root = CommandNode::new("app").subcommand(
//!         CommandNode::new("greet")
//!             .flag(Flag::string("name", "world").shorthand('n'))
//!             .action(|inv| {
//!                 println!("hello {}", inv.get_string("name")?);
//!                 Ok(())
//!             }),
//!     );
//!
//!     let mut shell = Shell::new(root, ShellOptions::default())?;
//!     shell.set_prompt_prefix("app> ");
//!     shell.run()
//! }
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod repl;

// Re-export commonly used types
pub use command::{CommandNode, Flag};
pub use config::Config;
pub use error::{Result, ShellError};
pub use repl::{Shell, ShellOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
