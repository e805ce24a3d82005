//! Cursor context and completion hints
//!
//! This module works out what the user is typing from the buffer and the
//! word under the cursor, and bundles it with the resolved command into a
//! [`CompletionHint`].

use crate::command::{CommandPath, Flag};
use crate::repl::tokenizer::tokenize;

/// Tokens of the buffer split around the cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorContext {
    /// All tokens of the buffer
    pub tokens: Vec<String>,
    /// Token before the one being typed (empty if none)
    pub prev: String,
    /// Partial token under the cursor (empty at a word boundary)
    pub curr: String,
}

impl CursorContext {
    /// Resolve the context from the full buffer and the word before the cursor.
    ///
    /// An empty `word_before_cursor` means the cursor sits on whitespace: the
    /// last token is complete and becomes `prev`. Otherwise the last token is
    /// the one being typed.
    pub fn resolve(full_text: &str, word_before_cursor: &str) -> Self {
        let tokens = tokenize(full_text);

        let (prev, curr) = if word_before_cursor.is_empty() {
            // [info --name ]
            //             ^   prev = "--name", curr = ""
            (tokens.last().cloned().unwrap_or_default(), String::new())
        } else {
            // [info --name abc]
            //                ^   prev = "--name", curr = "abc"
            let prev = match tokens.len() {
                n if n >= 2 => tokens[n - 2].clone(),
                _ => String::new(),
            };
            (prev, tokens.last().cloned().unwrap_or_default())
        };

        Self { tokens, prev, curr }
    }
}

/// Text from the last space before `pos` up to `pos`.
///
/// Returns the byte offset where that word starts along with the word.
/// A `pos` past the end or inside a multi-byte character is clamped back
/// to the nearest character boundary.
pub fn word_before_cursor(line: &str, pos: usize) -> (usize, &str) {
    let mut end = pos.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    let before = &line[..end];
    let start = before.rfind(' ').map(|i| i + 1).unwrap_or(0);
    (start, &before[start..])
}

/// Everything the suggestion sources need to know about one cursor position.
#[derive(Debug, Clone, Copy)]
pub struct CompletionHint<'a> {
    /// Currently selected command, with its ancestors
    pub cmd: &'a CommandPath<'a>,
    /// Flag whose value is being completed, set only for value completion
    pub flag: Option<&'a Flag>,
    /// Whole command line
    pub args: &'a [String],
    /// Previous word
    pub prev: &'a str,
    /// Current word under the cursor
    pub curr: &'a str,
}

impl<'a> CompletionHint<'a> {
    pub fn new(cmd: &'a CommandPath<'a>, context: &'a CursorContext) -> Self {
        Self {
            cmd,
            flag: None,
            args: &context.tokens,
            prev: &context.prev,
            curr: &context.curr,
        }
    }

    /// Same hint, focused on one flag
    pub fn with_flag(self, flag: &'a Flag) -> Self {
        Self {
            flag: Some(flag),
            ..self
        }
    }
}
