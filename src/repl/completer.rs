//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span};

use super::completion::{
    CompletionHint, CursorContext, FlagValueCompleter, Suggestion, SuggestionEngine, navigate,
    word_before_cursor,
};
use super::shared_state::SharedTree;

/// Completer over the shared command tree
pub struct TreeCompleter {
    tree: SharedTree,
    engine: SuggestionEngine,
}

impl TreeCompleter {
    pub fn new(tree: SharedTree, policy: Arc<dyn FlagValueCompleter>) -> Self {
        Self {
            tree,
            engine: SuggestionEngine::new(policy),
        }
    }

    /// Suggestions for the cursor at byte offset `pos` of `line`, with the
    /// offset where the word being replaced starts.
    pub fn suggestions(&self, line: &str, pos: usize) -> (usize, Vec<Suggestion>) {
        let (start, word) = word_before_cursor(line, pos);
        let context = CursorContext::resolve(line, word);

        let root = self.tree.read();
        let path = navigate(&root, &context.tokens);
        let hint = CompletionHint::new(&path, &context);
        (start, self.engine.suggest(&hint))
    }
}

impl Completer for TreeCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<reedline::Suggestion> {
        let (start, candidates) = self.suggestions(line, pos);
        let end = pos.max(start).min(line.len());

        candidates
            .into_iter()
            .map(|candidate| reedline::Suggestion {
                value: candidate.text,
                description: Some(candidate.description).filter(|d| !d.is_empty()),
                span: Span::new(start, end),
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandNode, Flag};
    use crate::repl::completion::DefaultFlagValueCompleter;

    fn create_test_completer() -> TreeCompleter {
        let root = CommandNode::new("basket")
            .subcommand(
                CommandNode::new("add")
                    .short("Add fruit")
                    .subcommand(
                        CommandNode::new("apple")
                            .short("Apple")
                            .flag(Flag::string("color", "red").shorthand('c').usage("Color"))
                            .action(|_| Ok(())),
                    ),
            )
            .subcommand(CommandNode::new("show").short("Show basket").action(|_| Ok(())));
        TreeCompleter::new(SharedTree::new(root), Arc::new(DefaultFlagValueCompleter))
    }

    #[test]
    fn test_complete_root() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("", 0);

        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["add", "show"]);
        assert_eq!(suggestions[0].description.as_deref(), Some("Add fruit"));
    }

    #[test]
    fn test_complete_flag_value() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("add apple --color ", 18);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "red");
        assert_eq!(suggestions[0].description.as_deref(), Some("default value"));
    }

    #[test]
    fn test_span_position() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("add apple --co", 14);

        assert!(!suggestions.is_empty());
        for suggestion in suggestions {
            assert_eq!(suggestion.span.start, 10);
            assert_eq!(suggestion.span.end, 14);
            assert!(suggestion.append_whitespace);
        }
    }

    #[test]
    fn test_partial_word_completes_sibling() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("add app", 7);

        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["apple"]);
    }
}
