//! Command-line interface for ng-jest-migrate.
//!
//! The tool has a single entry point and no subcommands. Running it without
//! flags migrates the project in the current directory.
//!
//! ```bash
//! # Migrate the project in the current directory
//! ng-jest-migrate
//!
//! # Preview the migration of another project
//! ng-jest-migrate --path ../my-app --dry-run
//!
//! # Give up on npm after five minutes
//! ng-jest-migrate --install-timeout 300
//!
//! # Print the version and exit
//! ng-jest-migrate -v
//! ```
//!
//! # Environment
//!
//! - `NG_JEST_MIGRATE_NO_PROGRESS` - same as `--no-progress`
//! - `NG_JEST_MIGRATE_INSTALL_TIMEOUT` - same as `--install-timeout`
//! - `RUST_LOG` - overrides the log filter chosen by `--verbose`/`--quiet`

#[cfg(test)]
mod tests;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::MigrateConfig;
use crate::migration::{ExitStatus, Migration};

#[derive(Parser, Debug)]
#[command(
    name = "ng-jest-migrate",
    about = "Migrate an Angular project's tests from Karma/Jasmine to Jest",
    version,
    disable_version_flag = true,
    long_about = "Installs jest and jest-preset-angular, removes the Karma packages, \
                  creates the Jest setup files, updates package.json, angular.json and \
                  tsconfig.spec.json, and deletes karma.conf.js and src/test.ts."
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Project directory containing package.json and angular.json
    #[arg(short, long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Show what would change without running npm or touching files
    #[arg(long)]
    dry_run: bool,

    /// Disable the spinner shown while npm runs
    #[arg(
        long,
        env = "NG_JEST_MIGRATE_NO_PROGRESS",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_progress: bool,

    /// Kill npm commands that run longer than this many seconds
    #[arg(long, env = "NG_JEST_MIGRATE_INSTALL_TIMEOUT", value_name = "SECONDS")]
    install_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Set up logging and run the migration.
    ///
    /// # Errors
    ///
    /// Returns an error if the project directory does not exist or if
    /// dependency installation fails.
    pub async fn execute(self) -> Result<ExitStatus> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> MigrateConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        MigrateConfig {
            project_dir: self.path.clone().unwrap_or_else(|| PathBuf::from(".")),
            dry_run: self.dry_run,
            show_progress: !self.no_progress,
            install_timeout: self.install_timeout.map(Duration::from_secs),
            log_level: Some(log_level.to_string()),
        }
    }
}

/// Run the migration described by `config` and print its summary.
///
/// # Errors
///
/// Returns an error if the project directory does not exist or if
/// dependency installation fails.
pub async fn execute_with_config(config: MigrateConfig) -> Result<ExitStatus> {
    if !config.project_dir.is_dir() {
        bail!("Project directory not found: {}", config.project_dir.display());
    }

    let migration = Migration::new(config);
    let summary = migration.run().await?;

    if !migration.config().dry_run {
        summary.print();
    }

    Ok(summary.exit_status())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.unwrap_or("off"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
