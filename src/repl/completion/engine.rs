//! Suggestion engine - ranks completions for one cursor position
//!
//! Three independent sources each return an ordered list:
//!
//! - values for a flag named by the previous token
//! - available subcommands of the resolved command
//! - flag names visible at the resolved command
//!
//! [`SuggestionEngine::suggest`] concatenates them in that order, dropping
//! flag names whenever a flag value was offered.

use std::sync::Arc;

use tracing::trace;

use super::context::CompletionHint;
use super::policy::{DefaultFlagValueCompleter, FlagValueCompleter};

/// One completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text inserted in place of the current word
    pub text: String,
    /// Short description shown next to the candidate
    pub description: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

/// Values for every visible flag whose long or short form equals `hint.prev`
pub fn flag_value_suggestions(
    hint: &CompletionHint<'_>,
    policy: &dyn FlagValueCompleter,
) -> Vec<Suggestion> {
    if hint.prev.is_empty() {
        return Vec::new();
    }

    hint.cmd
        .visible_flags()
        .into_iter()
        .filter(|flag| !flag.is_hidden() && flag.matches_token(hint.prev))
        .flat_map(|flag| policy.complete_value(&hint.with_flag(flag)))
        .collect()
}

/// Available children of the resolved command starting with `hint.curr`
pub fn command_suggestions(hint: &CompletionHint<'_>) -> Vec<Suggestion> {
    hint.cmd
        .node()
        .children()
        .iter()
        .filter(|child| child.is_available() && child.name().starts_with(hint.curr))
        .map(|child| Suggestion::new(child.name(), child.short_description()))
        .collect()
}

/// Long and short forms of non-hidden visible flags starting with `hint.curr`
pub fn flag_name_suggestions(hint: &CompletionHint<'_>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    for flag in hint.cmd.visible_flags() {
        if flag.is_hidden() {
            continue;
        }

        let long = flag.long_form();
        if long.starts_with(hint.curr) {
            suggestions.push(Suggestion::new(long, flag.usage_text()));
        }
        if let Some(short) = flag.short_form() {
            if short.starts_with(hint.curr) {
                suggestions.push(Suggestion::new(short, flag.usage_text()));
            }
        }
    }
    suggestions
}

/// Combines the suggestion sources using a flag value policy
#[derive(Clone)]
pub struct SuggestionEngine {
    policy: Arc<dyn FlagValueCompleter>,
}

impl SuggestionEngine {
    /// Create an engine with the given flag value policy
    pub fn new(policy: Arc<dyn FlagValueCompleter>) -> Self {
        Self { policy }
    }

    /// Ordered suggestions for the position described by `hint`
    pub fn suggest(&self, hint: &CompletionHint<'_>) -> Vec<Suggestion> {
        let values = flag_value_suggestions(hint, self.policy.as_ref());
        let commands = command_suggestions(hint);

        trace!(
            "suggest at '{}': prev='{}' curr='{}' values={} commands={}",
            hint.cmd.node().name(),
            hint.prev,
            hint.curr,
            values.len(),
            commands.len()
        );

        let mut suggestions = values;
        let suppress_flag_names = !suggestions.is_empty();
        suggestions.extend(commands);
        if !suppress_flag_names {
            suggestions.extend(flag_name_suggestions(hint));
        }
        suggestions
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(Arc::new(DefaultFlagValueCompleter))
    }
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine").finish_non_exhaustive()
    }
}
