//! Chain of command nodes from the root to a resolved command

use super::{CommandNode, Flag};

/// The nodes visited from the root down to a resolved command.
///
/// Navigation and execution both produce a path; it is what gives a node
/// access to the flags it inherits from its ancestors.
#[derive(Debug, Clone)]
pub struct CommandPath<'a> {
    nodes: Vec<&'a CommandNode>,
}

impl<'a> CommandPath<'a> {
    /// Path containing only the root
    pub fn root(root: &'a CommandNode) -> Self {
        Self { nodes: vec![root] }
    }

    /// Extend the path by one child
    pub fn push(&mut self, child: &'a CommandNode) {
        self.nodes.push(child);
    }

    /// The resolved command (last node of the path)
    pub fn node(&self) -> &'a CommandNode {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of levels below the root
    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Names of the nodes below the root, outermost first
    pub fn names(&self) -> Vec<&'a str> {
        self.nodes[1..].iter().map(|n| n.name()).collect()
    }

    /// Strict ancestors of the resolved command, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = &'a CommandNode> + '_ {
        self.nodes[..self.nodes.len() - 1].iter().rev().copied()
    }

    /// Flags declared on the resolved command, in declaration order
    pub fn local_flags(&self) -> impl Iterator<Item = &'a Flag> {
        self.node().flags().iter()
    }

    /// Persistent flags of strict ancestors, nearest ancestor first.
    ///
    /// A name already visible closer to the resolved command shadows the
    /// same name further up.
    pub fn inherited_flags(&self) -> Vec<&'a Flag> {
        let mut seen: Vec<&str> = self.local_flags().map(Flag::name).collect();
        let mut inherited = Vec::new();
        for ancestor in self.ancestors() {
            for flag in ancestor.persistent_flags() {
                if !seen.contains(&flag.name()) {
                    seen.push(flag.name());
                    inherited.push(flag);
                }
            }
        }
        inherited
    }

    /// Local flags followed by inherited flags
    pub fn visible_flags(&self) -> Vec<&'a Flag> {
        let mut flags: Vec<&'a Flag> = self.local_flags().collect();
        flags.extend(self.inherited_flags());
        flags
    }

    /// Visible flag with the given long name
    pub fn lookup_flag(&self, name: &str) -> Option<&'a Flag> {
        self.local_flags()
            .find(|f| f.name() == name)
            .or_else(|| self.inherited_flags().into_iter().find(|f| f.name() == name))
    }
}
