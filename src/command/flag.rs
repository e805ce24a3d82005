//! Typed, defaulted flags attached to command nodes

use std::fmt;

use crate::error::{CommandError, Result};

/// Type of value a flag carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
    Int,
    Float,
    StringList,
}

impl FlagKind {
    /// Type name as shown in usage and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FlagKind::Bool => "bool",
            FlagKind::String => "string",
            FlagKind::Int => "int",
            FlagKind::Float => "float",
            FlagKind::StringList => "stringList",
        }
    }
}

/// Current or default value of a flag
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
    StringList(Vec<String>),
}

impl FlagValue {
    /// Kind of this value
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::String(_) => FlagKind::String,
            FlagValue::Int(_) => FlagKind::Int,
            FlagValue::Float(_) => FlagKind::Float,
            FlagValue::StringList(_) => FlagKind::StringList,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::String(s) => write!(f, "{s}"),
            FlagValue::Int(n) => write!(f, "{n}"),
            FlagValue::Float(x) => write!(f, "{x}"),
            FlagValue::StringList(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

/// A named configuration value of a command, settable per invocation.
///
/// The default is immutable once declared. The current value is
/// overwritten by command-line parsing and restored by [`Flag::reset`].
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    shorthand: Option<char>,
    usage: String,
    hidden: bool,
    value: FlagValue,
    default: FlagValue,
    changed: bool,
}

impl Flag {
    fn with_default(name: impl Into<String>, default: FlagValue) -> Self {
        Self {
            name: name.into(),
            shorthand: None,
            usage: String::new(),
            hidden: false,
            value: default.clone(),
            default,
            changed: false,
        }
    }

    /// Boolean flag; its presence on the command line sets it to `true`
    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self::with_default(name, FlagValue::Bool(default))
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_default(name, FlagValue::String(default.into()))
    }

    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self::with_default(name, FlagValue::Int(default))
    }

    pub fn float(name: impl Into<String>, default: f64) -> Self {
        Self::with_default(name, FlagValue::Float(default))
    }

    /// Repeatable flag; each occurrence (or comma-separated item) appends a value
    pub fn string_list<I, S>(name: impl Into<String>, default: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_default(
            name,
            FlagValue::StringList(default.into_iter().map(Into::into).collect()),
        )
    }

    /// Set the one-character shorthand (`-x`)
    pub fn shorthand(mut self, shorthand: char) -> Self {
        self.shorthand = Some(shorthand);
        self
    }

    /// Set the usage text shown in help and completion descriptions
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Hide the flag from help and completion
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shorthand_char(&self) -> Option<char> {
        self.shorthand
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn kind(&self) -> FlagKind {
        self.default.kind()
    }

    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    /// Default rendered as text, the form offered by default value completion
    pub fn def_value(&self) -> String {
        self.default.to_string()
    }

    /// Whether the value was set since the last reset
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Long form as typed on the command line (`--name`)
    pub fn long_form(&self) -> String {
        format!("--{}", self.name)
    }

    /// Shorthand form as typed on the command line (`-x`), if any
    pub fn short_form(&self) -> Option<String> {
        self.shorthand.map(|c| format!("-{c}"))
    }

    /// Whether `token` names this flag in long or shorthand form
    pub fn matches_token(&self, token: &str) -> bool {
        token == self.long_form() || self.short_form().is_some_and(|s| s == token)
    }

    /// Parse `raw` into the flag's type and store it.
    ///
    /// List flags append, so repeated occurrences accumulate until the
    /// next reset.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        let invalid = || CommandError::InvalidFlagValue {
            flag: self.name.clone(),
            value: raw.to_string(),
            kind: self.kind().type_name(),
        };

        let parsed = match self.kind() {
            FlagKind::Bool => FlagValue::Bool(parse_bool(raw).ok_or_else(invalid)?),
            FlagKind::String => FlagValue::String(raw.to_string()),
            FlagKind::Int => FlagValue::Int(raw.trim().parse().map_err(|_| invalid())?),
            FlagKind::Float => FlagValue::Float(raw.trim().parse().map_err(|_| invalid())?),
            FlagKind::StringList => {
                let mut items = match (&self.value, self.changed) {
                    (FlagValue::StringList(current), true) => current.clone(),
                    _ => Vec::new(),
                };
                items.extend(
                    raw.split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
                FlagValue::StringList(items)
            }
        };

        self.value = parsed;
        self.changed = true;
        Ok(())
    }

    /// Restore the declared default and clear the changed marker
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.changed = false;
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_value_rendering() {
        assert_eq!(Flag::string("color", "red").def_value(), "red");
        assert_eq!(Flag::int("count", 1).def_value(), "1");
        assert_eq!(Flag::bool("dry-run", false).def_value(), "false");
        assert_eq!(Flag::float("ratio", 0.5).def_value(), "0.5");
        assert_eq!(Flag::string_list("tag", ["a", "b"]).def_value(), "[a,b]");
    }

    #[test]
    fn test_matches_token() {
        let flag = Flag::string("color", "red").shorthand('c');
        assert!(flag.matches_token("--color"));
        assert!(flag.matches_token("-c"));
        assert!(!flag.matches_token("-x"));
        assert!(!flag.matches_token("color"));

        let no_short = Flag::int("size", 3);
        assert!(!no_short.matches_token("-"));
    }

    #[test]
    fn test_set_and_reset() {
        let mut flag = Flag::int("count", 1);
        flag.set("5").unwrap();
        assert_eq!(flag.value(), &FlagValue::Int(5));
        assert_eq!(flag.default_value(), &FlagValue::Int(1));
        assert!(flag.changed());

        flag.reset();
        assert_eq!(flag.value(), flag.default_value());
        assert!(!flag.changed());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut flag = Flag::int("count", 1);
        let err = flag.set("many").unwrap_err();
        assert!(err.to_string().contains("--count"));
        assert_eq!(flag.value(), &FlagValue::Int(1));
        assert!(!flag.changed());
    }

    #[test]
    fn test_bool_parsing() {
        let mut flag = Flag::bool("verbose", false);
        flag.set("true").unwrap();
        assert_eq!(flag.value(), &FlagValue::Bool(true));
        flag.set("F").unwrap();
        assert_eq!(flag.value(), &FlagValue::Bool(false));
        assert!(flag.set("yes").is_err());
    }

    #[test]
    fn test_string_list_appends_until_reset() {
        let mut flag = Flag::string_list("tag", ["default"]);
        flag.set("a").unwrap();
        flag.set("b,c").unwrap();
        assert_eq!(
            flag.value(),
            &FlagValue::StringList(vec!["a".into(), "b".into(), "c".into()])
        );

        flag.reset();
        assert_eq!(flag.value(), &FlagValue::StringList(vec!["default".into()]));
    }
}
