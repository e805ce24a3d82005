//! REPL (Read-Eval-Print Loop) engine for command trees
//!
//! This module provides an interactive shell over a [`CommandNode`] tree:
//! - Line editing with reedline
//! - Tree-aware completion of subcommands, flags and flag values
//! - Reset of all flag values before every submitted line
//! - Live prompt prefix
//! - Command history and syntax highlighting
//!
//! [`CommandNode`]: crate::command::CommandNode

mod completer;
pub mod completion;
mod dispatcher;
mod engine;
mod highlighter;
mod hinter;
mod prompt;
mod shared_state;
mod tokenizer;

pub use completer::TreeCompleter;
pub use dispatcher::{execute, try_execute};
pub use engine::{Shell, ShellOptions};
pub use highlighter::CommandHighlighter;
pub use hinter::HistoryHinter;
pub use prompt::ShellPrompt;
pub use shared_state::{PrefixProvider, SharedTree};
pub use tokenizer::tokenize;

#[cfg(test)]
mod tests;
