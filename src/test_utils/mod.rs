//! Test utilities for ng-jest-migrate
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration test suite.
//!
//! - [`init_test_logging`] - one-time tracing setup
//! - [`FakePackageManager`] - records commands instead of running npm
//! - [`ProjectFixture`] - a temporary Karma-based Angular project
//!
//! # Example
//!
//! ```rust,no_run
//! use ng_jest_migrate::migration::Migration;
//! use ng_jest_migrate::test_utils::{FakePackageManager, ProjectFixture};
//!
//! # async fn example() {
//! let project = ProjectFixture::karma_app();
//! let pm = FakePackageManager::succeeding();
//! let summary = Migration::new(project.config()).run_with(&pm).await.unwrap();
//! assert_eq!(pm.calls().len(), 2);
//! # }
//! ```

mod fixtures;

pub use fixtures::ProjectFixture;

use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::MigrateError;
use crate::installer::{CommandOutput, PackageCommand, PackageManager};
use crate::utils::progress::Spinner;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A [`PackageManager`] that records each command and returns canned results.
#[derive(Debug, Default)]
pub struct FakePackageManager {
    calls: Mutex<Vec<String>>,
    fail_at: Option<usize>,
    stderr: String,
}

impl FakePackageManager {
    /// Every command succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// The command with zero-based index `index` fails with exit code 1.
    #[must_use]
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Successful commands report `stderr`, the way npm reports warnings.
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// The commands run so far, rendered as command lines.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl PackageManager for FakePackageManager {
    async fn run(
        &self,
        command: &PackageCommand,
        output: &Spinner,
    ) -> Result<CommandOutput, MigrateError> {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            calls.push(command.to_string());
            calls.len() - 1
        };

        output.println(format!("fake: {command}"));

        if self.fail_at == Some(index) {
            return Err(MigrateError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
                stderr: "npm ERR! fake failure".to_string(),
            });
        }

        Ok(CommandOutput {
            stderr: self.stderr.clone(),
        })
    }
}
