//! Run configuration.
//!
//! Built once from the command line (see [`crate::cli::Cli::build_config`])
//! and passed explicitly to the migration; nothing is read from global state
//! after startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    /// Directory holding `package.json`, `angular.json` and `tsconfig.spec.json`.
    pub project_dir: PathBuf,

    /// Print the planned actions without running anything.
    pub dry_run: bool,

    pub show_progress: bool,

    /// Limit for each package-manager command. `None` waits indefinitely.
    pub install_timeout: Option<Duration>,

    /// `tracing` filter directive; `None` silences logging.
    pub log_level: Option<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            dry_run: false,
            show_progress: true,
            install_timeout: None,
            log_level: Some("info".to_string()),
        }
    }
}

impl MigrateConfig {
    #[must_use]
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub const fn with_install_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.install_timeout = timeout;
        self
    }
}
