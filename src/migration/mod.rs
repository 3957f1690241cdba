//! The Karma to Jest migration workflow.
//!
//! A run is six stages executed in order:
//!
//! 1. install Jest and uninstall Karma ([`crate::installer`])
//! 2. create `src/jestGlobalMock.ts` and `src/setupJest.ts` ([`files`])
//! 3. update `package.json` ([`manifest`])
//! 4. update `angular.json` ([`workspace`])
//! 5. delete `karma.conf.js` and `src/test.ts` ([`files`])
//! 6. update `tsconfig.spec.json` ([`tsconfig`])
//!
//! Stage 1 is the only one that can stop the run. Every later stage reads its
//! own file fresh from disk, reports a [`StageReport`] and never blocks the
//! stages after it. Nothing is rolled back.
//!
//! # Example
//!
//! ```rust,no_run
//! use ng_jest_migrate::config::MigrateConfig;
//! use ng_jest_migrate::migration::Migration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let summary = Migration::new(MigrateConfig::new("path/to/app")).run().await?;
//! summary.print();
//! # Ok(())
//! # }
//! ```

pub mod files;
pub mod manifest;
pub mod report;
pub mod tsconfig;
pub mod workspace;

pub use report::{ExitStatus, MigrationSummary, Stage, StageOutcome, StageReport};

use colored::Colorize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::MigrateConfig;
use crate::constants::{ANGULAR_JSON, LEGACY_TEST_ENTRY, PACKAGE_JSON, TSCONFIG_SPEC_JSON};
use crate::core::MigrateError;
use crate::installer::{DependencyPlan, NpmPackageManager, PackageManager, install_dependencies};
use crate::utils::fs::{read_json_file, write_json_file};

/// Coordinates the stages of one migration run.
#[derive(Debug, Clone)]
pub struct Migration {
    config: MigrateConfig,
    plan: DependencyPlan,
}

impl Migration {
    #[must_use]
    pub fn new(config: MigrateConfig) -> Self {
        Self {
            config,
            plan: DependencyPlan::default(),
        }
    }

    #[must_use]
    pub fn with_plan(mut self, plan: DependencyPlan) -> Self {
        self.plan = plan;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MigrateConfig {
        &self.config
    }

    /// Run the migration with the system package manager.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`MigrateError`] if dependency installation fails.
    pub async fn run(&self) -> Result<MigrationSummary, MigrateError> {
        let package_manager = NpmPackageManager::new(&self.config.project_dir)
            .with_timeout(self.config.install_timeout);
        self.run_with(&package_manager).await
    }

    /// Run the migration with a caller-supplied package manager.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`MigrateError`] if dependency installation fails. No
    /// file has been touched in that case.
    pub async fn run_with<P: PackageManager>(
        &self,
        package_manager: &P,
    ) -> Result<MigrationSummary, MigrateError> {
        let dir = self.config.project_dir.as_path();
        let mut summary = MigrationSummary::default();

        if self.config.dry_run {
            self.print_plan();
            return Ok(summary);
        }

        println!("🔍 Migrating Karma to Jest in: {}", dir.display());

        install_dependencies(package_manager, &self.plan, self.config.show_progress).await?;
        summary.extend(
            self.plan
                .commands()
                .into_iter()
                .map(|command| StageReport::applied(Stage::InstallDependencies, command.to_string())),
        );

        summary.extend(files::create_bootstrap_files(dir));
        summary.push(manifest::update_manifest(dir));
        summary.push(workspace::update_workspace(dir));
        summary.extend(files::delete_legacy_files(dir));
        summary.push(tsconfig::update_compiler_config(dir));

        tracing::debug!(
            target: "migration",
            "Finished with {} step(s), {} failure(s)",
            summary.reports.len(),
            summary.failures().count()
        );
        Ok(summary)
    }

    /// Every action a run would take, in order, one line each.
    #[must_use]
    pub fn planned_actions(&self) -> Vec<String> {
        let mut actions: Vec<String> =
            self.plan.commands().iter().map(|command| format!("run {command}")).collect();
        actions.extend(files::BOOTSTRAP_FILES.iter().map(|f| format!("create {}", f.path)));
        actions.push(format!("update {PACKAGE_JSON} (jest block, scripts.test)"));
        actions.push(format!("update {ANGULAR_JSON} (remove test targets)"));
        actions.extend(files::LEGACY_FILES.iter().map(|f| format!("delete {f}")));
        actions.push(format!(
            "update {TSCONFIG_SPEC_JSON} (drop {LEGACY_TEST_ENTRY}, enable esModuleInterop and emitDecoratorMetadata)"
        ));
        actions
    }

    fn print_plan(&self) {
        println!(
            "🔍 Planned migration in: {}",
            self.config.project_dir.display()
        );
        for action in self.planned_actions() {
            println!("  • {action}");
        }
        println!(
            "\n{} (use without --dry-run to perform migration)",
            "Dry run complete".yellow()
        );
    }
}

/// Read `file` from `project_dir` as a JSON document.
pub(crate) fn load_document(project_dir: &Path, file: &str) -> Result<Value, MigrateError> {
    read_json_file(&project_dir.join(file)).map_err(|e| MigrateError::ParseError {
        file: file.to_string(),
        reason: format!("{e:#}"),
    })
}

/// Persist `document` to `file` in `project_dir` with 2-space indentation.
pub(crate) fn save_document(
    project_dir: &Path,
    file: &str,
    document: &Value,
) -> Result<(), MigrateError> {
    write_json_file(&project_dir.join(file), document).map_err(|e| {
        MigrateError::FileSystemError {
            operation: "write".to_string(),
            path: file.to_string(),
            reason: format!("{e:#}"),
        }
    })
}

/// The top-level object of a document.
pub(crate) fn root_object<'a>(
    document: &'a mut Value,
    file: &str,
) -> Result<&'a mut Map<String, Value>, MigrateError> {
    document.as_object_mut().ok_or_else(|| MigrateError::InvalidStructure {
        file: file.to_string(),
        reason: "top level is not an object".to_string(),
    })
}
