//! termfolio session engine.
//!
//! Platform-agnostic core of the portfolio terminal: the cooperative
//! scheduler, typing effect, history store, mode controller with its two
//! overlays, and the view model front ends draw. This crate has zero
//! platform dependencies.

// Re-exports from termfolio-types (foundation types and traits).
pub use termfolio_types::backend;
pub use termfolio_types::config;
pub use termfolio_types::error;
pub use termfolio_types::input;

pub use termfolio_skin as skin;
pub use termfolio_terminal as terminal;

pub mod history;
pub mod matrix;
pub mod mode;
mod render;
pub mod scheduler;
pub mod session;
pub mod snake;
pub mod typing;
pub mod view;

pub use mode::Mode;
pub use session::TerminalSession;
pub use view::{Screen, Span, Style, ViewLine};
