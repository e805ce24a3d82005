//! Completion system for the command tree
//!
//! Every keystroke runs the same pipeline over the shared command tree:
//!
//! - **Context**: tokenizes the buffer and splits it into previous and current word
//! - **Navigator**: walks the tokens down the tree to the command being typed
//! - **Engine**: asks the three suggestion sources and applies the ordering rule
//! - **Policy**: pluggable strategy for flag values
//!
//! # Examples
//!
//! ```
//! use treeprompt::command::{CommandNode, Flag};
//! use treeprompt::repl::completion::{navigate, CompletionHint, CursorContext, SuggestionEngine};
//!
//! let root = CommandNode::new("basket").subcommand(
//!     CommandNode::new("apple")
//!         .flag(Flag::string("color", "red"))
//!         .action(|_| Ok(())),
//! );
//!
//! let ctx = CursorContext::resolve("apple --color ", "");
//! let path = navigate(&root, &ctx.tokens);
//! let hint = CompletionHint::new(&path, &ctx);
//!
//! let suggestions = SuggestionEngine::default().suggest(&hint);
//! assert_eq!(suggestions[0].text, "red");
//! ```

mod context;
mod engine;
mod navigator;
mod policy;

pub use context::{CompletionHint, CursorContext, word_before_cursor};
pub use engine::{
    Suggestion, SuggestionEngine, command_suggestions, flag_name_suggestions,
    flag_value_suggestions,
};
pub use navigator::navigate;
pub use policy::{DefaultFlagValueCompleter, FlagValueCompleter};
