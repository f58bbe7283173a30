//! Utility Functions
//!
//! ## Error Formatting
//!
//! The [`errors`] module provides user-friendly error messages:
//!
//! ```rust,no_run
//! use keystroke_engine::utils::format_user_error;
//!
//! # fn operation() -> anyhow::Result<()> { Ok(()) }
//! if let Err(e) = operation() {
//!     eprintln!("{}", format_user_error(&e));
//! }
//! ```
//!
//! Error categories with context-aware help:
//! - Template errors → id ranges, keystroke syntax
//! - Event script errors → accepted line formats
//! - Dispatch errors → fall back to inline dispatch
//! - Config errors → accepted values

pub mod errors;

pub use errors::format_user_error;
