//! Context handed to command actions

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{CommandNode, CommandPath, Flag, FlagValue};
use crate::error::{CommandError, Result};

/// Session-wide state shared between the REPL loop and running commands.
#[derive(Debug, Clone)]
pub struct SessionState {
    running: Arc<AtomicBool>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Ask the shell to stop once the current command returns
    pub fn request_exit(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved command about to run, with its positional arguments.
///
/// The invocation borrows the whole tree mutably, so an action can change
/// flag values with [`Invocation::set_flag`]. Such changes stay in the
/// tree until the next reset.
pub struct Invocation<'a> {
    root: &'a mut CommandNode,
    indices: Vec<usize>,
    args: Vec<String>,
    session: &'a SessionState,
}

impl<'a> Invocation<'a> {
    /// `indices` are the child positions leading from `root` to the command
    pub(crate) fn new(
        root: &'a mut CommandNode,
        indices: Vec<usize>,
        args: Vec<String>,
        session: &'a SessionState,
    ) -> Self {
        Self {
            root,
            indices,
            args,
            session,
        }
    }

    /// The command being run
    pub fn command(&self) -> &CommandNode {
        self.root.descendant(&self.indices)
    }

    pub fn path(&self) -> CommandPath<'_> {
        let mut path = CommandPath::root(&*self.root);
        for depth in 1..=self.indices.len() {
            path.push(self.root.descendant(&self.indices[..depth]));
        }
        path
    }

    /// Positional arguments left after flags and subcommand names
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Visible flag (local, then inherited) by long name
    pub fn flag(&self, name: &str) -> Result<&Flag> {
        self.path()
            .lookup_flag(name)
            .ok_or_else(|| CommandError::UnknownFlag(name.to_string()).into())
    }

    /// Whether the flag was set on this command line or by this action
    pub fn changed(&self, name: &str) -> bool {
        self.path().lookup_flag(name).is_some_and(Flag::changed)
    }

    /// Parse `raw` into the visible flag `name` and store it on the node
    /// that owns the flag.
    pub fn set_flag(&mut self, name: &str, raw: &str) -> Result<()> {
        let depth = self
            .owner_depth(name)
            .ok_or_else(|| CommandError::UnknownFlag(name.to_string()))?;
        let owner = self.root.descendant_mut(&self.indices[..depth]);
        match owner.flag_mut(name) {
            Some(flag) => flag.set(raw),
            None => Err(CommandError::UnknownFlag(name.to_string()).into()),
        }
    }

    /// Depth of the node owning the visible flag `name`, following the
    /// same shadowing as [`CommandPath::lookup_flag`]
    fn owner_depth(&self, name: &str) -> Option<usize> {
        let path = self.path();
        if path.local_flags().any(|f| f.name() == name) {
            return Some(path.depth());
        }
        path.ancestors()
            .position(|node| node.persistent_flags().any(|f| f.name() == name))
            .map(|nearest| path.depth() - 1 - nearest)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.flag(name)?.value() {
            FlagValue::Bool(b) => Ok(*b),
            other => Err(mismatch(name, "bool", other)),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<&str> {
        match self.flag(name)?.value() {
            FlagValue::String(s) => Ok(s.as_str()),
            other => Err(mismatch(name, "string", other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.flag(name)?.value() {
            FlagValue::Int(n) => Ok(*n),
            other => Err(mismatch(name, "int", other)),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.flag(name)?.value() {
            FlagValue::Float(x) => Ok(*x),
            other => Err(mismatch(name, "float", other)),
        }
    }

    pub fn get_string_list(&self, name: &str) -> Result<&[String]> {
        match self.flag(name)?.value() {
            FlagValue::StringList(items) => Ok(items.as_slice()),
            other => Err(mismatch(name, "stringList", other)),
        }
    }

    /// Ask the shell to stop after this command returns
    pub fn request_exit(&self) {
        self.session.request_exit();
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &FlagValue) -> crate::error::ShellError {
    CommandError::FlagTypeMismatch {
        flag: name.to_string(),
        expected,
        actual: actual.kind().type_name(),
    }
    .into()
}
