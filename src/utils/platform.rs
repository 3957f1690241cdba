//! Platform-specific helpers for locating the package manager.

use std::path::PathBuf;

use crate::core::MigrateError;

/// Returns true when running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Name of the npm executable for the current platform.
///
/// On Windows npm is installed as a batch shim, so `Command::new("npm")`
/// would not find it.
#[must_use]
pub const fn get_npm_command() -> &'static str {
    if is_windows() {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Resolve `program` on `PATH`.
///
/// # Errors
///
/// Returns [`MigrateError::PackageManagerNotFound`] when the binary cannot be found.
pub fn locate_program(program: &str) -> Result<PathBuf, MigrateError> {
    which::which(program).map_err(|_| MigrateError::PackageManagerNotFound {
        program: program.to_string(),
    })
}
