//! Dispatch of submitted lines

use tracing::debug;

use super::tokenizer::tokenize;
use crate::command::{CommandNode, SessionState, reset_flag_values};
use crate::error::Result;

/// Run one submitted line against the tree.
///
/// Every flag in the tree goes back to its default before the tokens are
/// handed to the tree, so each line behaves like a fresh process.
pub fn try_execute(root: &mut CommandNode, line: &str, session: &SessionState) -> Result<()> {
    let tokens = tokenize(line);
    debug!("dispatch {:?}", tokens);

    reset_flag_values(root);
    root.set_args(tokens);
    root.execute(session)
}

/// Like [`try_execute`], but failures are printed and the session goes on.
///
/// Returns whether the command succeeded.
pub fn execute(root: &mut CommandNode, line: &str, session: &SessionState) -> bool {
    match try_execute(root, line, session) {
        Ok(()) => true,
        Err(err) => {
            debug!("command failed: {}", err);
            eprintln!("{}", err);
            false
        }
    }
}
