use std::{fmt, io};

/// Crate-wide `Result` type using [`ShellError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Top-level error type for shell operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate, including by
/// command actions.
#[derive(Debug)]
pub enum ShellError {
    /// Command tree definition or execution errors.
    Command(CommandError),

    /// Configuration errors.
    Config(ConfigError),

    /// Argument parsing errors reported by clap, already rendered.
    Usage(String),

    /// I/O errors (terminal, history file, log file).
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Command tree errors.
#[derive(Debug)]
pub enum CommandError {
    /// Two siblings share a name or alias.
    DuplicateCommand { parent: String, name: String },

    /// A flag long name is declared twice in one visible flag set.
    DuplicateFlag { command: String, flag: String },

    /// A flag shorthand is declared twice in one visible flag set.
    DuplicateShorthand { command: String, shorthand: char },

    /// A flag was declared with an empty long name.
    EmptyFlagName { command: String },

    /// A flag value could not be parsed into the flag's type.
    InvalidFlagValue {
        flag: String,
        value: String,
        kind: &'static str,
    },

    /// A flag lookup did not match any visible flag.
    UnknownFlag(String),

    /// A typed getter was used on a flag of another type.
    FlagTypeMismatch {
        flag: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Positional arguments do not satisfy the command's arity.
    InvalidArgCount {
        command: String,
        expected: String,
        found: usize,
    },

    /// A command action reported failure.
    Failed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl ShellError {
    /// Shorthand used by command actions to report a failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        ShellError::Command(CommandError::Failed(msg.into()))
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Command(e) => write!(f, "{e}"),
            ShellError::Config(e) => write!(f, "Configuration error: {e}"),
            ShellError::Usage(msg) => write!(f, "{}", msg.trim_end()),
            ShellError::Io(e) => write!(f, "I/O error: {e}"),
            ShellError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::DuplicateCommand { parent, name } => {
                write!(f, "Command '{parent}' declares subcommand '{name}' twice")
            }
            CommandError::DuplicateFlag { command, flag } => {
                write!(f, "Flag '--{flag}' is declared twice for command '{command}'")
            }
            CommandError::DuplicateShorthand { command, shorthand } => {
                write!(
                    f,
                    "Shorthand '-{shorthand}' is declared twice for command '{command}'"
                )
            }
            CommandError::EmptyFlagName { command } => {
                write!(f, "Command '{command}' declares a flag without a name")
            }
            CommandError::InvalidFlagValue { flag, value, kind } => {
                write!(f, "invalid argument \"{value}\" for \"--{flag}\": expected {kind}")
            }
            CommandError::UnknownFlag(name) => write!(f, "flag accessed but not defined: {name}"),
            CommandError::FlagTypeMismatch {
                flag,
                expected,
                actual,
            } => write!(f, "trying to get {expected} value of flag '{flag}' of type {actual}"),
            CommandError::InvalidArgCount {
                command,
                expected,
                found,
            } => write!(f, "'{command}' accepts {expected}, received {found}"),
            CommandError::Failed(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Command(e) => Some(e),
            ShellError::Config(e) => Some(e),
            ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for CommandError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to ShellError ========================= */

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::Command(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

impl From<clap::Error> for ShellError {
    fn from(err: clap::Error) -> Self {
        ShellError::Usage(err.render().to_string())
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<reedline::ReedlineError> for ShellError {
    fn from(err: reedline::ReedlineError) -> Self {
        ShellError::Generic(format!("Line editor error: {err}"))
    }
}

impl From<String> for ShellError {
    fn from(msg: String) -> Self {
        ShellError::Generic(msg)
    }
}

impl From<&str> for ShellError {
    fn from(msg: &str) -> Self {
        ShellError::Generic(msg.to_owned())
    }
}
