//! Locate the command the input refers to

use crate::command::{CommandNode, CommandPath, FlagKind};

/// Walk down from `root` following `tokens` as a chain of child names.
///
/// Each token must equal the name (or an alias) of a child of the node
/// reached so far. The walk stops at the first token that does not, and
/// the deepest node reached is returned; with no match at all that is the
/// root. Hidden commands can be walked through.
///
/// Flag tokens do not end the walk. They are stepped over together with
/// the value that follows a known non-boolean flag written without `=`,
/// so `add -n 3 apple` reaches `apple`.
///
/// The caller may pass every token of the buffer, including a word that is
/// still being typed. A partial word cannot equal a child's name, so the
/// walk halts one level early while the user is mid-word.
pub fn navigate<'a>(root: &'a CommandNode, tokens: &[String]) -> CommandPath<'a> {
    let mut path = CommandPath::root(root);
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        if token.starts_with('-') {
            if takes_separate_value(&path, token) {
                tokens.next();
            }
            continue;
        }
        match path.node().find_child(token) {
            Some(child) => path.push(child),
            None => break,
        }
    }
    path
}

/// Whether `token` names a flag visible at `path` whose value is the next token
fn takes_separate_value(path: &CommandPath<'_>, token: &str) -> bool {
    !token.contains('=')
        && path
            .visible_flags()
            .into_iter()
            .any(|flag| flag.kind() != FlagKind::Bool && flag.matches_token(token))
}
