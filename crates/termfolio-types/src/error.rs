//! Error types for termfolio.

use std::io;

/// Errors produced by the termfolio crates.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    /// The first token of a submitted line names no registered command.
    ///
    /// Carries the raw line exactly as the user typed it.
    #[error("Command not found: {0}. Type 'help' for available commands.")]
    UnknownCommand(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("mode error: {0}")]
    Mode(String),

    #[error("theme error: {0}")]
    Theme(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermfolioError>;
