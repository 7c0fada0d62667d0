//! Command interpreter for the portfolio terminal.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The interpreter parses input
//! lines, resolves the command name, and dispatches `execute()`. Commands
//! that affect the session (clear, theme, overlays, contact form) return a
//! signal variant of `CommandOutput` instead of content.

mod commands;
pub mod contact;
pub mod content;
mod interpreter;
pub mod portfolio;
mod portfolio_commands;
pub mod suggest;
mod theme_commands;

/// Register all built-in commands into a registry.
pub use commands::{contact_intro, register_builtins};
/// Interactive contact form state.
pub use contact::{ContactForm, ContactStep, SubmitOutcome};
/// Displayable output of a command.
pub use content::{ContentBlock, ContentLine, Tone};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (content or a session signal).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Read-only context passed to every command.
pub use interpreter::Environment;
/// Flag declaration and line tokenizer.
pub use interpreter::{FlagSpec, ParsedLine, usage};
/// Portfolio data rendered by the content commands.
pub use portfolio::Portfolio;
/// Completion engine.
pub use suggest::{Placement, Suggestion, SuggestionCursor, suggest};
