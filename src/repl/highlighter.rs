//! Highlighter for command lines
//!
//! Words are colored by what they mean in the command tree: the command
//! path, flags known at the resolved command, flags it does not know, and
//! quoted text. The line is walked with the same rules the completer uses.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use super::shared_state::SharedTree;
use crate::command::{CommandNode, CommandPath, FlagKind};

/// Word of the input line with its original spelling
#[derive(Debug, PartialEq)]
enum Segment<'l> {
    Space(&'l str),
    Word(&'l str),
}

/// Split a line into words and the whitespace between them.
///
/// A word starting with a quote runs to the matching quote, spaces
/// included, or to the end of the line when the quote is never closed.
fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = line;

    while let Some(first) = rest.chars().next() {
        let len = if first.is_whitespace() {
            rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len())
        } else if first == '"' || first == '\'' {
            rest[1..]
                .find(first)
                .map(|i| {
                    let closed = i + 2;
                    closed
                        + rest[closed..]
                            .find(char::is_whitespace)
                            .unwrap_or(rest.len() - closed)
                })
                .unwrap_or(rest.len())
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };

        let (head, tail) = rest.split_at(len);
        if first.is_whitespace() {
            out.push(Segment::Space(head));
        } else {
            out.push(Segment::Word(head));
        }
        rest = tail;
    }
    out
}

/// Colors command lines against the shared command tree
pub struct CommandHighlighter {
    tree: SharedTree,
    enabled: bool,
}

impl CommandHighlighter {
    pub fn new(tree: SharedTree, enabled: bool) -> Self {
        Self { tree, enabled }
    }

    fn command_style() -> Style {
        Color::Green.bold()
    }

    fn flag_style() -> Style {
        Color::Cyan.normal()
    }

    fn unknown_flag_style() -> Style {
        Color::Red.normal()
    }

    fn quoted_style() -> Style {
        Color::Yellow.normal()
    }

    fn style_line(root: &CommandNode, line: &str) -> StyledText {
        let mut styled = StyledText::new();
        let mut path = CommandPath::root(root);
        let mut in_path = true;
        let mut value_next = false;

        for segment in segments(line) {
            let word = match segment {
                Segment::Space(space) => {
                    styled.push((Style::default(), space.to_string()));
                    continue;
                }
                Segment::Word(word) => word,
            };

            // flags and their values do not end the command path
            let is_value = std::mem::take(&mut value_next);
            if in_path && !is_value && !word.starts_with('-') {
                if let Some(child) = path.node().find_child(word) {
                    path.push(child);
                    styled.push((Self::command_style(), word.to_string()));
                    continue;
                }
                in_path = false;
            }

            let style = if word.starts_with('"') || word.starts_with('\'') {
                Self::quoted_style()
            } else if word.len() > 1 && word.starts_with('-') {
                let (name, inline_value) = match word.split_once('=') {
                    Some((name, _)) => (name, true),
                    None => (word, false),
                };
                let visible = path.visible_flags();
                match visible.iter().find(|f| f.matches_token(name)) {
                    Some(flag) => {
                        value_next = !inline_value && flag.kind() != FlagKind::Bool;
                        Self::flag_style()
                    }
                    None => Self::unknown_flag_style(),
                }
            } else {
                Style::default()
            };
            styled.push((style, word.to_string()));
        }
        styled
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        if !self.enabled {
            let mut styled = StyledText::new();
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let root = self.tree.read();
        Self::style_line(&root, line)
    }
}
