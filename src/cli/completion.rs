//! Shell completion scripts for the treeprompt binary
//!
//! Covers the binary's own arguments and subcommands. Completion inside
//! the interactive shell is handled by the REPL.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

/// Binary name the scripts register completions for
const BIN_NAME: &str = "treeprompt";

/// Render the completion script for `shell_name`
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish, powershell, elvish)
///
/// # Returns
/// * `Result<String>` - Completion script or error for an unknown shell
pub fn completion_script(shell_name: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;

    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Print the completion script for `shell_name` to stdout
pub fn generate_completion(shell_name: &str) -> Result<()> {
    print!("{}", completion_script(shell_name)?);
    Ok(())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        _ => Err(ConfigError::InvalidValue {
            field: "shell".to_string(),
            value: shell_name.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert_eq!(parse_shell("bash").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("ZSH").unwrap(), Shell::Zsh);
        assert_eq!(parse_shell("pwsh").unwrap(), Shell::PowerShell);
        assert!(parse_shell("cmd").is_err());
    }

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let script = completion_script("bash").unwrap();
        assert!(script.contains(BIN_NAME));
        assert!(script.contains("completion"));
        assert!(script.contains("--no-history"));
    }

    #[test]
    fn test_fish_script() {
        let script = completion_script("fish").unwrap();
        assert!(script.contains("complete -c treeprompt"));
    }
}
