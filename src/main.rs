//! treeprompt - interactive command-tree shell
//!
//! Runs a small fruit-basket shell to show the completion engine at work:
//! subcommands, flags and flag values are completed from the command tree
//! as you type.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! treeprompt
//!
//! # Shell completion for the binary itself
//! treeprompt completion zsh
//! ```

mod basket;

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use treeprompt::cli::CliInterface;
use treeprompt::error::Result;
use treeprompt::repl::{PrefixProvider, Shell, ShellOptions};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli)?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();
    run_interactive_mode(&cli)
}

/// Run the fruit-basket shell until the user leaves
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let prefix = PrefixProvider::new(cli.config().prompt.prefix.clone());
    let items = basket::Items::default();
    let root = basket::command_tree(items, prefix.clone());

    let mut shell = Shell::new(root, ShellOptions::from_config(cli.config()))?
        .with_prefix_provider(prefix);
    shell.set_flag_value_completer(basket::BasketCompleter);
    shell.run()?;

    if !cli.args().quiet {
        println!("Goodbye!");
    }
    Ok(())
}

/// Initialize logging system from configuration
///
/// Logs go to the configured file when there is one, otherwise to stderr
/// so they do not mix with command output. `RUST_LOG` overrides the level.
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;
    let level = LevelFilter::from_level(logging.level.to_tracing_level());
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (&logging.file_path, logging.timestamps) {
        (Some(path), timestamps) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = subscriber.with_ansi(false).with_writer(Mutex::new(file));
            if timestamps {
                subscriber.init();
            } else {
                subscriber.without_time().init();
            }
        }
        (None, true) => subscriber.with_writer(std::io::stderr).init(),
        (None, false) => subscriber.with_writer(std::io::stderr).without_time().init(),
    }

    Ok(())
}
