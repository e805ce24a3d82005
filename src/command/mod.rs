//! Command tree for the interactive shell
//!
//! A tree of named commands, each with optional flags and subcommands. The
//! shell builds the tree once at startup, walks it for completion on every
//! keystroke and executes it for every submitted line.
//!
//! - [`CommandNode`]: one named command, its flags and its children
//! - [`Flag`]: a typed, defaulted value attached to a command
//! - [`CommandPath`]: the chain of nodes from the root to a resolved command
//! - [`Invocation`]: what a command action sees when it runs
//!
//! Flags declared with [`CommandNode::persistent_flag`] are inherited by every
//! descendant. Everything else is local to the node that declares it.

mod execute;
mod flag;
mod invocation;
mod path;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{CommandError, Result};

pub use flag::{Flag, FlagKind, FlagValue};
pub use invocation::{Invocation, SessionState};
pub use path::CommandPath;

/// Action run when a command is executed
pub type Action = Arc<dyn Fn(&mut Invocation<'_>) -> Result<()> + Send + Sync>;

/// Positional argument count accepted by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    #[default]
    Any,
    None,
    Exact(usize),
    Min(usize),
    Max(usize),
    Range(usize, usize),
}

impl Arity {
    /// Check a positional argument count against this arity
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Any => true,
            Arity::None => count == 0,
            Arity::Exact(n) => count == n,
            Arity::Min(n) => count >= n,
            Arity::Max(n) => count <= n,
            Arity::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Any => write!(f, "any number of arguments"),
            Arity::None => write!(f, "no arguments"),
            Arity::Exact(n) => write!(f, "exactly {n} argument(s)"),
            Arity::Min(n) => write!(f, "at least {n} argument(s)"),
            Arity::Max(n) => write!(f, "at most {n} argument(s)"),
            Arity::Range(min, max) => write!(f, "between {min} and {max} arguments"),
        }
    }
}

/// A named command in the tree.
///
/// Nodes are built once through the builder methods and live for the
/// whole shell session. Only flag values change afterwards.
pub struct CommandNode {
    name: String,
    short: String,
    long: String,
    aliases: Vec<String>,
    hidden: bool,
    deprecated: Option<String>,
    flags: Vec<Flag>,
    persistent: Vec<bool>,
    children: Vec<CommandNode>,
    arity: Arity,
    action: Option<Action>,
    args: Option<Vec<String>>,
}

impl CommandNode {
    /// Create a command with the given name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: String::new(),
            long: String::new(),
            aliases: Vec::new(),
            hidden: false,
            deprecated: None,
            flags: Vec::new(),
            persistent: Vec::new(),
            children: Vec::new(),
            arity: Arity::Any,
            action: None,
            args: None,
        }
    }

    /// One-line description, shown next to completion suggestions
    pub fn short(mut self, text: impl Into<String>) -> Self {
        self.short = text.into();
        self
    }

    /// Long description, shown in help
    pub fn long(mut self, text: impl Into<String>) -> Self {
        self.long = text.into();
        self
    }

    /// Alternative name accepted when navigating and executing
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark as deprecated; the message is printed whenever the command runs
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    /// Declare a flag visible on this command only
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self.persistent.push(false);
        self
    }

    /// Declare a flag visible on this command and all of its descendants
    pub fn persistent_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self.persistent.push(true);
        self
    }

    pub fn subcommand(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Invocation<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.short
    }

    pub fn long_description(&self) -> &str {
        &self.long
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    pub fn is_runnable(&self) -> bool {
        self.action.is_some()
    }

    /// Children in declaration order
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// All flags owned by this node, persistent ones included, in declaration order
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut [Flag] {
        &mut self.flags
    }

    /// Flags owned by this node that descendants inherit
    pub fn persistent_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags
            .iter()
            .zip(&self.persistent)
            .filter(|(_, persistent)| **persistent)
            .map(|(flag, _)| flag)
    }

    pub fn is_persistent(&self, flag_name: &str) -> bool {
        self.flags
            .iter()
            .zip(&self.persistent)
            .any(|(flag, persistent)| *persistent && flag.name() == flag_name)
    }

    pub fn flag_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.iter_mut().find(|f| f.name() == name)
    }

    /// Node reached by following child indices from this node
    pub(crate) fn descendant(&self, indices: &[usize]) -> &CommandNode {
        indices.iter().fold(self, |node, &index| &node.children[index])
    }

    pub(crate) fn descendant_mut(&mut self, indices: &[usize]) -> &mut CommandNode {
        let mut node = self;
        for &index in indices {
            node = &mut node.children[index];
        }
        node
    }

    /// Whether the command should be offered to the user.
    ///
    /// Hidden and deprecated commands are never available. Otherwise a
    /// command must either run something or lead to an available child.
    pub fn is_available(&self) -> bool {
        if self.hidden || self.deprecated.is_some() {
            return false;
        }
        self.is_runnable() || self.children.iter().any(CommandNode::is_available)
    }

    /// Whether `token` is this command's name or one of its aliases
    pub fn has_name_or_alias(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Child whose name or alias equals `token`
    pub fn find_child(&self, token: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.has_name_or_alias(token))
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut CommandNode> {
        self.children.get_mut(index)
    }

    /// Argument vector used by the next [`CommandNode::execute`]
    pub fn set_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
    }

    /// Check the structural invariants of the whole tree.
    ///
    /// Sibling names and aliases are unique; every flag has a name; long
    /// names and shorthands are unique in the flag set visible at each node.
    pub fn validate(&self) -> Result<()> {
        self.validate_with_inherited(&[])
    }

    fn validate_with_inherited(&self, inherited: &[&Flag]) -> Result<()> {
        let mut names = HashSet::new();
        let mut shorthands = HashSet::new();

        for flag in self.flags.iter().chain(inherited.iter().copied()) {
            if flag.name().is_empty() {
                return Err(CommandError::EmptyFlagName {
                    command: self.name.clone(),
                }
                .into());
            }
            if !names.insert(flag.name()) {
                return Err(CommandError::DuplicateFlag {
                    command: self.name.clone(),
                    flag: flag.name().to_string(),
                }
                .into());
            }
            if let Some(c) = flag.shorthand_char()
                && !shorthands.insert(c)
            {
                return Err(CommandError::DuplicateShorthand {
                    command: self.name.clone(),
                    shorthand: c,
                }
                .into());
            }
        }

        let mut child_names = HashSet::new();
        for child in &self.children {
            for name in std::iter::once(&child.name).chain(&child.aliases) {
                if !child_names.insert(name.as_str()) {
                    return Err(CommandError::DuplicateCommand {
                        parent: self.name.clone(),
                        name: name.clone(),
                    }
                    .into());
                }
            }
        }

        let mut for_children: Vec<&Flag> = inherited.to_vec();
        for_children.extend(self.persistent_flags());
        for child in &self.children {
            child.validate_with_inherited(&for_children)?;
        }

        Ok(())
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("hidden", &self.hidden)
            .field("flags", &self.flags)
            .field("children", &self.children)
            .field("runnable", &self.is_runnable())
            .finish()
    }
}

/// Reset every flag in the tree to its declared default.
///
/// Each node resets only the flags it owns; the recursion over children
/// covers inherited flags at their owner.
pub fn reset_flag_values(node: &mut CommandNode) {
    for flag in node.flags_mut() {
        flag.reset();
    }
    for child in &mut node.children {
        reset_flag_values(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_tree() -> CommandNode {
        CommandNode::new("root")
            .subcommand(CommandNode::new("show").short("Show items").action(|_| Ok(())))
            .subcommand(
                CommandNode::new("add")
                    .short("Add an item")
                    .persistent_flag(Flag::int("count", 1).shorthand('n'))
                    .subcommand(
                        CommandNode::new("apple")
                            .flag(Flag::string("color", "red").shorthand('c'))
                            .action(|_| Ok(())),
                    ),
            )
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        assert!(fruit_tree().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_siblings() {
        let root = CommandNode::new("root")
            .subcommand(CommandNode::new("show"))
            .subcommand(CommandNode::new("list").alias("show"));
        let err = root.validate().unwrap_err();
        assert!(err.to_string().contains("'show' twice"));
    }

    #[test]
    fn test_validate_rejects_inherited_shorthand_clash() {
        let root = CommandNode::new("root")
            .persistent_flag(Flag::bool("verbose", false).shorthand('v'))
            .subcommand(CommandNode::new("add").flag(Flag::string("variant", "").shorthand('v')));
        let err = root.validate().unwrap_err();
        assert!(err.to_string().contains("'-v'"));
    }

    #[test]
    fn test_validate_rejects_empty_flag_name() {
        let root = CommandNode::new("root").flag(Flag::bool("", false));
        assert!(root.validate().is_err());
    }

    #[test]
    fn test_local_flags_do_not_clash_across_siblings() {
        let root = CommandNode::new("root")
            .subcommand(CommandNode::new("a").flag(Flag::int("size", 1).shorthand('s')))
            .subcommand(CommandNode::new("b").flag(Flag::int("size", 2).shorthand('s')));
        assert!(root.validate().is_ok());
    }

    #[test]
    fn test_availability() {
        let root = CommandNode::new("root")
            .subcommand(CommandNode::new("runnable").action(|_| Ok(())))
            .subcommand(CommandNode::new("secret").hidden(true).action(|_| Ok(())))
            .subcommand(CommandNode::new("old").deprecated("use new").action(|_| Ok(())))
            .subcommand(CommandNode::new("empty"))
            .subcommand(
                CommandNode::new("group")
                    .subcommand(CommandNode::new("leaf").action(|_| Ok(()))),
            );

        let available: Vec<&str> = root
            .children()
            .iter()
            .filter(|c| c.is_available())
            .map(CommandNode::name)
            .collect();
        assert_eq!(available, vec!["runnable", "group"]);
    }

    #[test]
    fn test_find_child_by_alias() {
        let root = CommandNode::new("root").subcommand(CommandNode::new("remove").alias("rm"));
        assert_eq!(root.find_child("rm").map(CommandNode::name), Some("remove"));
        assert!(root.find_child("re").is_none());
    }

    #[test]
    fn test_reset_flag_values_recurses() {
        let mut root = fruit_tree();
        root.child_mut(1).unwrap().flag_mut("count").unwrap().set("4").unwrap();
        root.child_mut(1)
            .unwrap()
            .child_mut(0)
            .unwrap()
            .flag_mut("color")
            .unwrap()
            .set("green")
            .unwrap();

        reset_flag_values(&mut root);

        let add = &root.children()[1];
        assert_eq!(add.flags()[0].value(), &FlagValue::Int(1));
        assert_eq!(add.children()[0].flags()[0].value(), &FlagValue::String("red".into()));
    }

    #[test]
    fn test_persistent_flags() {
        let root = fruit_tree();
        let add = &root.children()[1];
        assert!(add.is_persistent("count"));
        assert_eq!(add.persistent_flags().count(), 1);
        assert!(!add.children()[0].is_persistent("color"));
    }

    #[test]
    fn test_arity() {
        assert!(Arity::Any.accepts(7));
        assert!(Arity::None.accepts(0));
        assert!(!Arity::None.accepts(1));
        assert!(Arity::Exact(2).accepts(2));
        assert!(Arity::Min(1).accepts(3));
        assert!(!Arity::Max(1).accepts(2));
        assert!(Arity::Range(1, 2).accepts(2));
        assert!(!Arity::Range(1, 2).accepts(0));
    }
}
