use std::path::PathBuf;
use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, IdeMenu, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, info, warn};

use crate::command::{CommandNode, SessionState};
use crate::config::{Config, MenuStyle};
use crate::error::Result;

use super::completer::TreeCompleter;
use super::completion::{DefaultFlagValueCompleter, FlagValueCompleter, Suggestion};
use super::dispatcher;
use super::highlighter::CommandHighlighter;
use super::hinter::HistoryHinter;
use super::prompt::ShellPrompt;
use super::shared_state::{PrefixProvider, SharedTree};

/// Name the completion menu is registered under
const COMPLETION_MENU: &str = "completion_menu";

/// Terminal behavior of a [`Shell`]
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOptions {
    /// Completion menu layout
    pub menu: MenuStyle,

    /// Accept a single candidate without opening the menu
    pub quick_completions: bool,

    /// Insert the common prefix of all candidates first
    pub partial_completions: bool,

    /// Open the completion menu with the down arrow
    pub complete_on_down: bool,

    /// Print the top-level completions once before the first prompt
    pub completions_at_start: bool,

    /// History file and capacity; in-memory history when `None`
    pub history: Option<(PathBuf, usize)>,

    /// Color the input line
    pub syntax_highlighting: bool,

    /// Show history hints after the cursor
    pub history_hints: bool,

    /// Allow ANSI colors in the editor
    pub color: bool,
}

impl ShellOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            menu: config.completion.menu,
            quick_completions: config.completion.quick,
            partial_completions: config.completion.partial,
            complete_on_down: config.completion.on_down,
            completions_at_start: config.completion.at_start,
            history: config
                .history
                .persist
                .then(|| (config.history.file_path.clone(), config.history.max_size)),
            syntax_highlighting: config.display.syntax_highlighting,
            history_hints: config.display.history_hints,
            color: config.display.color_output,
        }
    }
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            menu: MenuStyle::Ide,
            quick_completions: false,
            partial_completions: true,
            complete_on_down: false,
            completions_at_start: true,
            history: None,
            syntax_highlighting: true,
            history_hints: true,
            color: true,
        }
    }
}

/// Interactive shell over a command tree.
///
/// Completion runs on every keystroke against the tree; each submitted
/// line resets the tree's flags and executes it.
pub struct Shell {
    tree: SharedTree,
    prefix: PrefixProvider,
    policy: Arc<dyn FlagValueCompleter>,
    options: ShellOptions,
    session: SessionState,
}

impl Shell {
    /// Create a shell, checking the tree's structure first
    ///
    /// # Arguments
    /// * `root` - Root of the command tree
    /// * `options` - Terminal behavior
    ///
    /// # Returns
    /// * `Result<Self>` - New shell, or the first structural problem found
    pub fn new(root: CommandNode, options: ShellOptions) -> Result<Self> {
        root.validate()?;
        Ok(Self {
            tree: SharedTree::new(root),
            prefix: PrefixProvider::default(),
            policy: Arc::new(DefaultFlagValueCompleter),
            options,
            session: SessionState::new(),
        })
    }

    /// Use `provider` for the prompt text.
    ///
    /// Commands that change the prompt hold clones of the same provider.
    pub fn with_prefix_provider(mut self, provider: PrefixProvider) -> Self {
        self.prefix = provider;
        self
    }

    /// Replace the prompt text; shown from the next line on
    pub fn set_prompt_prefix(&self, prefix: impl Into<String>) {
        self.prefix.set_prompt_prefix(prefix);
    }

    pub fn prefix_provider(&self) -> &PrefixProvider {
        &self.prefix
    }

    /// Replace the flag value completion policy
    pub fn set_flag_value_completer<P>(&mut self, policy: P)
    where
        P: FlagValueCompleter + 'static,
    {
        self.policy = Arc::new(policy);
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Completer over this shell's tree and policy
    pub fn completer(&self) -> TreeCompleter {
        TreeCompleter::new(self.tree.clone(), self.policy.clone())
    }

    /// Suggestions for an empty line: the available top-level commands
    /// followed by the root's flags
    pub fn start_suggestions(&self) -> Vec<Suggestion> {
        self.completer().suggestions("", 0).1
    }

    /// Execute one line as if it had been typed.
    ///
    /// Failures are printed and the shell carries on. Returns whether the
    /// command succeeded.
    pub fn dispatch(&self, line: &str) -> bool {
        let mut root = self.tree.write();
        dispatcher::execute(&mut root, line, &self.session)
    }

    /// Read and dispatch lines until Ctrl-D or a command asks to exit.
    ///
    /// Ctrl-C discards the current line. Terminal errors end the session
    /// and are returned.
    pub fn run(&mut self) -> Result<()> {
        let mut editor = self.build_editor();
        let prompt = ShellPrompt::new(self.prefix.clone());
        info!("shell started");

        if self.options.completions_at_start {
            let listing = render_listing(&self.start_suggestions());
            if !listing.is_empty() {
                println!("{listing}");
            }
        }

        while self.session.is_running() {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.dispatch(&line);
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => break,
                #[allow(unreachable_patterns)]
                _ => break,
            }
        }

        info!("shell stopped");
        Ok(())
    }

    fn build_editor(&self) -> Reedline {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        if self.options.complete_on_down {
            keybindings.add_binding(
                KeyModifiers::NONE,
                KeyCode::Down,
                ReedlineEvent::UntilFound(vec![
                    ReedlineEvent::MenuDown,
                    ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                    ReedlineEvent::Down,
                ]),
            );
        }

        let menu = match self.options.menu {
            MenuStyle::Ide => ReedlineMenu::EngineCompleter(Box::new(
                IdeMenu::default().with_name(COMPLETION_MENU),
            )),
            MenuStyle::Columnar => ReedlineMenu::EngineCompleter(Box::new(
                ColumnarMenu::default().with_name(COMPLETION_MENU),
            )),
        };

        let mut editor = Reedline::create()
            .with_completer(Box::new(self.completer()))
            .with_menu(menu)
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_quick_completions(self.options.quick_completions)
            .with_partial_completions(self.options.partial_completions)
            .with_ansi_colors(self.options.color);

        if self.options.syntax_highlighting {
            editor = editor.with_highlighter(Box::new(CommandHighlighter::new(
                self.tree.clone(),
                self.options.color,
            )));
        }
        if self.options.history_hints {
            editor = editor.with_hinter(Box::new(HistoryHinter::new()));
        }

        if let Some((path, capacity)) = &self.options.history {
            match FileBackedHistory::with_file(*capacity, path.clone()) {
                Ok(history) => {
                    debug!("history file {}", path.display());
                    editor = editor.with_history(Box::new(history));
                }
                Err(err) => warn!("history disabled, cannot open {}: {}", path.display(), err),
            }
        }

        editor
    }
}

/// One suggestion per line, descriptions aligned in a second column
fn render_listing(suggestions: &[Suggestion]) -> String {
    let width = suggestions.iter().map(|s| s.text.len()).max().unwrap_or(0);
    suggestions
        .iter()
        .map(|s| {
            if s.description.is_empty() {
                format!("  {}", s.text)
            } else {
                format!("  {:<width$}  {}", s.text, s.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
