//! Dependency installation, the first and only fatal stage of the migration.
//!
//! The installer runs two package-manager commands in sequence: add Jest as
//! a dev dependency, then remove the Karma and Jasmine packages. The second
//! command starts only after the first has exited successfully. Any failure
//! stops the migration, because every later stage assumes Jest is installed.

mod package_manager;

pub use package_manager::{CommandOutput, NpmPackageManager, PackageCommand, PackageManager};

use colored::Colorize;

use crate::constants::{JEST_PACKAGES, KARMA_PACKAGES};
use crate::core::MigrateError;
use crate::utils::progress::Spinner;

/// Packages to add and remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyPlan {
    pub install: Vec<String>,
    pub uninstall: Vec<String>,
}

impl Default for DependencyPlan {
    fn default() -> Self {
        Self {
            install: JEST_PACKAGES.iter().map(ToString::to_string).collect(),
            uninstall: KARMA_PACKAGES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl DependencyPlan {
    /// The commands to run, in order. An empty package list produces no command.
    #[must_use]
    pub fn commands(&self) -> Vec<PackageCommand> {
        let mut commands = Vec::with_capacity(2);
        if !self.install.is_empty() {
            commands.push(PackageCommand::install_dev(self.install.iter().cloned()));
        }
        if !self.uninstall.is_empty() {
            commands.push(PackageCommand::uninstall(self.uninstall.iter().cloned()));
        }
        commands
    }
}

/// Run every command of `plan` through `package_manager`, one after another.
///
/// # Errors
///
/// Returns the first command's error. Commands after a failed one are not run.
pub async fn install_dependencies<P: PackageManager>(
    package_manager: &P,
    plan: &DependencyPlan,
    show_progress: bool,
) -> Result<(), MigrateError> {
    for command in plan.commands() {
        println!("📦 Running {}", command.to_string().cyan());

        let spinner = Spinner::start(format!("{command}"), show_progress);
        let result = package_manager.run(&command, &spinner).await;
        spinner.finish();

        match result {
            Ok(output) => {
                let stderr = output.stderr.trim_end();
                if !stderr.is_empty() {
                    eprintln!("{stderr}");
                }
                println!("✅ {}", format!("{command} finished").green());
            }
            Err(e) => {
                tracing::error!(target: "installer", "exec error: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
