//! Core types shared by every migration stage.
//!
//! - [`MigrateError`] - typed errors, split into fatal and recoverable
//! - [`ErrorContext`] - an error plus a suggestion for the user
//! - [`user_friendly_error`] - conversion from [`anyhow::Error`] for display

pub mod error;

pub use error::{ErrorContext, MigrateError, create_error_context, user_friendly_error};
