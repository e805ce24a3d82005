//! Error handling module for the shell.
//!
//! This module provides the error types shared by the command tree, the
//! configuration layer and the REPL:
//! - Command tree definition and execution errors
//! - Configuration loading errors
//! - A single crate-wide [`ShellError`] that command actions return
//!
//! # Example
//!
//! ```rust
//! use treeprompt::error::{Result, ShellError};
//!
//! fn check_basket(len: usize) -> Result<()> {
//!     if len > 10 {
//!         return Err(ShellError::failed("basket is full"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_basket(11).is_err());
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CommandError, ConfigError, Result, ShellError};
