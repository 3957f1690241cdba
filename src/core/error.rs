//! Error handling for ng-jest-migrate
//!
//! Errors fall into two classes:
//! - **Fatal** errors come from the dependency installer. The rest of the
//!   migration assumes Jest is installed, so the run stops.
//! - **Recoverable** errors come from the file stages. They are reported with
//!   a manual fix and the run moves on to the next stage.
//!
//! [`MigrateError`] is the typed error. [`ErrorContext`] wraps it with a
//! user-facing suggestion, and [`user_friendly_error`] turns any
//! [`anyhow::Error`] into one.
//!
//! # Example
//!
//! ```rust,no_run
//! use ng_jest_migrate::core::{ErrorContext, MigrateError};
//!
//! let context = ErrorContext::new(MigrateError::ParseError {
//!     file: "angular.json".to_string(),
//!     reason: "expected value at line 1 column 1".to_string(),
//! })
//! .with_suggestion("Fix the JSON syntax in angular.json and run the migration again");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MigrateError {
    /// The package manager binary could not be located on `PATH`.
    #[error("{program} is not installed or not found in PATH")]
    PackageManagerNotFound {
        program: String,
    },

    /// A package-manager command exited with a non-zero status or could not be spawned.
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut {
        command: String,
        seconds: u64,
    },

    /// A configuration file is missing or is not valid JSON.
    #[error("Could not parse {file}")]
    ParseError {
        file: String,
        reason: String,
    },

    /// A configuration file parsed, but does not have the expected shape.
    #[error("Unexpected structure in {file}: {reason}")]
    InvalidStructure {
        file: String,
        reason: String,
    },

    #[error("File system error: {operation} {path}")]
    FileSystemError {
        operation: String,
        path: String,
        reason: String,
    },

    #[error("{message}")]
    Other {
        message: String,
    },
}

impl MigrateError {
    /// Fatal errors abort the migration; everything else is logged and skipped.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PackageManagerNotFound { .. }
                | Self::CommandFailed { .. }
                | Self::CommandTimedOut { .. }
        )
    }
}

/// An error paired with a human-readable explanation and a suggested fix.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub error: MigrateError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: MigrateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colored labels.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Attach the standard details and suggestion for a [`MigrateError`].
#[must_use]
pub fn create_error_context(error: MigrateError) -> ErrorContext {
    let (details, suggestion) = match &error {
        MigrateError::PackageManagerNotFound {
            program,
        } => (
            None,
            Some(format!(
                "Install Node.js (which ships {program}) and make sure it is on your PATH"
            )),
        ),
        MigrateError::CommandFailed {
            command,
            code,
            stderr,
        } => {
            let details = match (code, stderr.trim()) {
                (_, s) if !s.is_empty() => s.to_string(),
                (Some(code), _) => format!("Process exited with code {code}"),
                (None, _) => "Process was terminated by a signal".to_string(),
            };
            (
                Some(details),
                Some(format!(
                    "Run `{command}` manually to see the full output, then start the migration again"
                )),
            )
        }
        MigrateError::CommandTimedOut {
            command,
            ..
        } => (
            Some("Increase --install-timeout if the registry is slow".to_string()),
            Some(format!(
                "Check your network connection and registry settings, or run `{command}` manually"
            )),
        ),
        MigrateError::ParseError {
            file,
            reason,
        } => (Some(reason.clone()), Some(format!("Make sure {file} exists and contains valid JSON"))),
        MigrateError::InvalidStructure {
            file,
            ..
        } => (None, Some(format!("Edit {file} by hand; its top level must be a JSON object"))),
        MigrateError::FileSystemError {
            path,
            reason,
            ..
        } => (Some(reason.clone()), Some(format!("Check the permissions of {path}"))),
        MigrateError::Other {
            ..
        } => (None, None),
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}

/// Convert any error into an [`ErrorContext`] suitable for printing.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(migrate_error) = error.downcast_ref::<MigrateError>() {
        return create_error_context(migrate_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MigrateError::FileSystemError {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check the ownership and permissions of the project files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MigrateError::FileSystemError {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Run the command from the root of your Angular project");
            }
            _ => {}
        }
    }

    if let Some(json_error) = error.downcast_ref::<serde_json::Error>() {
        return ErrorContext::new(MigrateError::ParseError {
            file: "unknown".to_string(),
            reason: json_error.to_string(),
        })
        .with_suggestion("Check the JSON syntax of package.json, angular.json and tsconfig.spec.json");
    }

    // Preserve the full anyhow chain for anything we do not recognize
    ErrorContext::new(MigrateError::Other {
        message: format!("{error:#}"),
    })
}
