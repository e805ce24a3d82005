//! Execution of the command tree.
//!
//! Parsing is delegated to clap: a clap `Command` mirroring the tree is built
//! for each invocation, the token vector is parsed against it, and every flag
//! given on the command line is written back into the node that owns it.
//! The resolved command then runs with an [`Invocation`].

use clap::builder::{StyledStr, ValueParser};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use super::{CommandNode, CommandPath, Flag, FlagKind, Invocation, SessionState};
use crate::error::{CommandError, Result};

/// Clap id of the trailing positional arguments of runnable commands
const POSITIONAL_ID: &str = "__positional";

/// A flag value seen on the command line, addressed by owner depth
struct Assignment {
    depth: usize,
    flag: String,
    values: Vec<String>,
}

impl CommandNode {
    /// Execute the tree against the argument vector set by
    /// [`CommandNode::set_args`].
    ///
    /// Flag values given on the command line are stored before the action
    /// runs. Flags not mentioned keep their current value, so callers reset
    /// the tree first when each run must start from defaults.
    pub fn execute(&mut self, session: &SessionState) -> Result<()> {
        let args = self.args.clone().unwrap_or_default();

        let mut clap_root = build_clap_command(self, false);
        let argv = std::iter::once(self.name.clone()).chain(args);
        let matches = match clap_root.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.print()?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let (indices, assignments, positional) = resolve_matches(self, &matches);

        for assignment in assignments {
            let owner = self.descendant_mut(&indices[..assignment.depth]);
            if let Some(flag) = owner.flag_mut(&assignment.flag) {
                for value in &assignment.values {
                    flag.set(value)?;
                }
            }
        }

        let mut path = CommandPath::root(self);
        for &index in &indices {
            let child = &path.node().children[index];
            path.push(child);
        }
        let leaf = path.node();

        if let Some(message) = leaf.deprecation() {
            println!("Command \"{}\" is deprecated, {}", leaf.name(), message);
        }

        let Some(action) = leaf.action.clone() else {
            println!("{}", subcommand_help(&mut clap_root, &path.names()));
            return Ok(());
        };

        if !leaf.arity.accepts(positional.len()) {
            return Err(CommandError::InvalidArgCount {
                command: leaf.name().to_string(),
                expected: leaf.arity.to_string(),
                found: positional.len(),
            }
            .into());
        }

        debug!(
            command = %path.names().join(" "),
            args = ?positional,
            "running command"
        );
        let mut invocation = Invocation::new(self, indices, positional, session);
        action(&mut invocation)
    }
}

/// Walk the matched subcommand chain, collecting the child indices taken,
/// the flags set on the command line and the leaf's positional arguments.
fn resolve_matches(
    root: &CommandNode,
    matches: &ArgMatches,
) -> (Vec<usize>, Vec<Assignment>, Vec<String>) {
    let mut indices = Vec::new();
    let mut assignments = Vec::new();
    let mut node = root;
    let mut level = matches;

    loop {
        collect_assignments(node, level, indices.len(), &mut assignments);

        let Some((name, sub_matches)) = level.subcommand() else {
            break;
        };
        let Some(index) = node.children.iter().position(|c| c.name() == name) else {
            break;
        };
        indices.push(index);
        node = &node.children[index];
        level = sub_matches;
    }

    let positional = if node.is_runnable() {
        level
            .get_many::<String>(POSITIONAL_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    (indices, assignments, positional)
}

fn collect_assignments(
    node: &CommandNode,
    level: &ArgMatches,
    depth: usize,
    assignments: &mut Vec<Assignment>,
) {
    for flag in node.flags() {
        if level.value_source(flag.name()) != Some(ValueSource::CommandLine) {
            continue;
        }
        let values = level
            .get_many::<String>(flag.name())
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        assignments.push(Assignment {
            depth,
            flag: flag.name().to_string(),
            values,
        });
    }
}

fn subcommand_help(cmd: &mut Command, names: &[&str]) -> StyledStr {
    match names.split_first() {
        Some((first, rest)) => match cmd.find_subcommand_mut(first) {
            Some(sub) => subcommand_help(sub, rest),
            None => cmd.render_help(),
        },
        None => cmd.render_help(),
    }
}

fn claims_help(flag: &Flag) -> bool {
    flag.name() == "help" || flag.shorthand_char() == Some('h')
}

/// Mirror a node and its descendants as a clap command.
///
/// `help_taken` is set when an inherited flag already uses `--help` or `-h`,
/// in which case clap's own help flag is left out.
fn build_clap_command(node: &CommandNode, help_taken: bool) -> Command {
    let own_help = node.flags().iter().any(claims_help);
    let passes_help = help_taken || node.persistent_flags().any(claims_help);

    let mut cmd = Command::new(node.name().to_string())
        .disable_help_subcommand(true)
        .args_override_self(true)
        .hide(node.is_hidden());

    if help_taken || own_help {
        cmd = cmd.disable_help_flag(true);
    }
    if !node.short_description().is_empty() {
        cmd = cmd.about(node.short_description().to_string());
    }
    if !node.long_description().is_empty() {
        cmd = cmd.long_about(node.long_description().to_string());
    }
    if !node.aliases().is_empty() {
        cmd = cmd.aliases(node.aliases().to_vec());
    }

    for flag in node.flags() {
        cmd = cmd.arg(build_arg(flag, node.is_persistent(flag.name())));
    }

    if node.is_runnable() {
        cmd = cmd.arg(
            Arg::new(POSITIONAL_ID)
                .value_name("ARGS")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(ValueParser::string()),
        );
    }

    for child in node.children() {
        cmd = cmd.subcommand(build_clap_command(child, passes_help));
    }

    cmd
}

fn build_arg(flag: &Flag, global: bool) -> Arg {
    let mut arg = Arg::new(flag.name().to_string())
        .long(flag.name().to_string())
        .help(flag.usage_text().to_string())
        .hide(flag.is_hidden())
        .global(global)
        .value_parser(ValueParser::string());

    if let Some(c) = flag.shorthand_char() {
        arg = arg.short(c);
    }

    match flag.kind() {
        // `--flag` alone means true, `--flag=false` turns it off
        FlagKind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .action(ArgAction::Set),
        FlagKind::StringList => arg.value_name("strings").action(ArgAction::Append),
        FlagKind::Int | FlagKind::Float => arg
            .value_name(flag.kind().type_name())
            .allow_negative_numbers(true)
            .action(ArgAction::Set),
        FlagKind::String => arg.value_name("string").action(ArgAction::Set),
    }
}
