//! Hinter for reedline - inline hints from the history

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

/// Shows the rest of the latest history entry starting with the input
pub struct HistoryHinter {
    style: Style,
    current_hint: String,
}

impl HistoryHinter {
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    /// Remainder of `entry` after `line`, if `entry` extends it
    fn remainder<'e>(line: &str, entry: &'e str) -> Option<&'e str> {
        entry
            .strip_prefix(line)
            .filter(|rest| !rest.is_empty())
    }
}

impl Default for HistoryHinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for HistoryHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // hints only make sense at the end of a non-blank line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let entry = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next());

        let Some(entry) = entry else {
            return String::new();
        };
        let Some(hint) = Self::remainder(line, &entry.command_line) else {
            return String::new();
        };

        self.current_hint = hint.to_string();
        if use_ansi_coloring {
            self.style.paint(hint).to_string()
        } else {
            hint.to_string()
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// Hint up to and including the next word
    fn next_hint_token(&self) -> String {
        let leading = self.current_hint.len() - self.current_hint.trim_start().len();
        let word_end = self.current_hint[leading..]
            .find(char::is_whitespace)
            .map_or(self.current_hint.len(), |i| leading + i);
        self.current_hint[..word_end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::{FileBackedHistory, HistoryItem};

    fn create_test_history(lines: &[&str]) -> FileBackedHistory {
        let mut history = FileBackedHistory::new(100).unwrap();
        for line in lines {
            history.save(HistoryItem::from_command_line(*line)).unwrap();
        }
        history
    }

    #[test]
    fn test_hint_from_latest_entry() {
        let mut hinter = HistoryHinter::new();
        let history = create_test_history(&["add apple --color red", "add melon -s 4"]);

        let hint = hinter.handle("add m", 5, &history, false, "/tmp");
        assert_eq!(hint, "elon -s 4");
        assert_eq!(hinter.complete_hint(), "elon -s 4");
        assert_eq!(hinter.next_hint_token(), "elon");
    }

    #[test]
    fn test_empty_line_no_hint() {
        let mut hinter = HistoryHinter::new();
        let history = create_test_history(&["show"]);
        assert_eq!(hinter.handle("", 0, &history, true, "/tmp"), "");
        assert_eq!(hinter.handle("   ", 3, &history, true, "/tmp"), "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = HistoryHinter::new();
        let history = create_test_history(&["show"]);
        assert_eq!(hinter.handle("sh", 1, &history, true, "/tmp"), "");
        assert_eq!(hinter.complete_hint(), "");
    }

    #[test]
    fn test_next_token_keeps_leading_space() {
        let mut hinter = HistoryHinter::new();
        let history = create_test_history(&["add apple --color red"]);
        hinter.handle("add", 3, &history, false, "/tmp");
        assert_eq!(hinter.next_hint_token(), " apple");
    }

    #[test]
    fn test_exact_match_no_hint() {
        let mut hinter = HistoryHinter::new();
        let history = create_test_history(&["show"]);
        assert_eq!(hinter.handle("show", 4, &history, false, "/tmp"), "");
    }
}
