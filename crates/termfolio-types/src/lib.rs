//! Foundation types and traits for termfolio.
//!
//! This crate contains the platform-agnostic types shared by all termfolio
//! crates: colors, input events, backend trait definitions, configuration,
//! and the error type.

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
