//! Flag value completion policies
//!
//! The suggestion engine asks a [`FlagValueCompleter`] what to offer after a
//! flag that takes a value. Applications plug in their own policy; closures
//! work directly.

use super::context::CompletionHint;
use super::engine::Suggestion;
use crate::command::FlagKind;

/// Strategy producing value suggestions for the flag in `hint.flag`
pub trait FlagValueCompleter: Send + Sync {
    fn complete_value(&self, hint: &CompletionHint<'_>) -> Vec<Suggestion>;
}

impl<F> FlagValueCompleter for F
where
    F: Fn(&CompletionHint<'_>) -> Vec<Suggestion> + Send + Sync,
{
    fn complete_value(&self, hint: &CompletionHint<'_>) -> Vec<Suggestion> {
        self(hint)
    }
}

/// Offers the flag's declared default.
///
/// Boolean flags get nothing since toggling them takes no value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFlagValueCompleter;

impl FlagValueCompleter for DefaultFlagValueCompleter {
    fn complete_value(&self, hint: &CompletionHint<'_>) -> Vec<Suggestion> {
        match hint.flag {
            Some(flag) if flag.kind() != FlagKind::Bool => {
                vec![Suggestion::new(flag.def_value(), "default value")]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandNode, CommandPath, Flag};
    use crate::repl::completion::context::CursorContext;

    #[test]
    fn test_default_policy() {
        let root = CommandNode::new("root")
            .flag(Flag::string("color", "red"))
            .flag(Flag::bool("dry-run", false));
        let path = CommandPath::root(&root);
        let ctx = CursorContext::resolve("--color ", "");
        let hint = CompletionHint::new(&path, &ctx);

        let color = DefaultFlagValueCompleter.complete_value(&hint.with_flag(&root.flags()[0]));
        assert_eq!(color, vec![Suggestion::new("red", "default value")]);

        let dry_run = DefaultFlagValueCompleter.complete_value(&hint.with_flag(&root.flags()[1]));
        assert!(dry_run.is_empty());

        assert!(DefaultFlagValueCompleter.complete_value(&hint).is_empty());
    }

    #[test]
    fn test_closure_policy() {
        let policy = |hint: &CompletionHint<'_>| match hint.flag {
            Some(flag) if flag.name() == "color" => vec![Suggestion::new("green", "young apple")],
            _ => Vec::new(),
        };
        let root = CommandNode::new("root").flag(Flag::string("color", "red"));
        let path = CommandPath::root(&root);
        let ctx = CursorContext::default();
        let hint = CompletionHint::new(&path, &ctx).with_flag(&root.flags()[0]);
        assert_eq!(policy.complete_value(&hint)[0].text, "green");
    }
}
