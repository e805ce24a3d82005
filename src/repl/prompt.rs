//! Prompt rendered from the live prefix

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use super::shared_state::PrefixProvider;

/// Prompt for the shell.
///
/// The prefix is read from the [`PrefixProvider`] on every render, so
/// changes made by a command show up on the next line. The text is
/// written as is, escape sequences included.
pub struct ShellPrompt {
    provider: PrefixProvider,
}

impl ShellPrompt {
    pub fn new(provider: PrefixProvider) -> Self {
        Self { provider }
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let (prefix, _live) = self.provider.get_prefix();
        prefix.into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// The prefix carries its own indicator
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
