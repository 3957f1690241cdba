//! Fixed-path files: the Jest bootstrap files to create and the Karma files to delete.

use colored::Colorize;
use std::path::Path;

use super::report::{Stage, StageReport};
use crate::constants::{
    JEST_GLOBAL_MOCK_CONTENT, JEST_GLOBAL_MOCK_PATH, KARMA_CONF_PATH, LEGACY_TEST_ENTRY,
    SETUP_JEST_CONTENT, SETUP_JEST_PATH,
};
use crate::core::{ErrorContext, MigrateError};
use crate::utils::fs::atomic_write;

/// A file written verbatim by the migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Created in this order. `setupJest.ts` imports the mock module.
pub const BOOTSTRAP_FILES: [BootstrapFile; 2] = [
    BootstrapFile {
        path: JEST_GLOBAL_MOCK_PATH,
        content: JEST_GLOBAL_MOCK_CONTENT,
    },
    BootstrapFile {
        path: SETUP_JEST_PATH,
        content: SETUP_JEST_CONTENT,
    },
];

/// Karma files removed after the new setup is in place.
pub const LEGACY_FILES: [&str; 2] = [KARMA_CONF_PATH, LEGACY_TEST_ENTRY];

/// Write every bootstrap file, overwriting existing ones. Each write is
/// independent; a failure is reported and the next file is still attempted.
pub fn create_bootstrap_files(project_dir: &Path) -> Vec<StageReport> {
    BOOTSTRAP_FILES
        .iter()
        .map(|file| create_file(project_dir, file))
        .collect()
}

fn create_file(project_dir: &Path, file: &BootstrapFile) -> StageReport {
    let path = project_dir.join(file.path);
    match atomic_write(&path, file.content.as_bytes()) {
        Ok(()) => {
            println!("✅ {}", format!("File {} created", file.path).green());
            StageReport::applied(Stage::CreateFiles, file.path)
        }
        Err(e) => {
            tracing::error!(target: "migration", "Problem with creating file {}: {:#}", file.path, e);
            let suggestion = if file.content.is_empty() {
                format!("Create an empty file at {}", file.path)
            } else {
                format!("Create {} with the content shown above", file.path)
            };
            let mut context = ErrorContext::new(MigrateError::FileSystemError {
                operation: "create".to_string(),
                path: file.path.to_string(),
                reason: format!("{e:#}"),
            })
            .with_suggestion(suggestion);
            if !file.content.is_empty() {
                context = context.with_details(file.content.trim_end().to_string());
            }
            StageReport::failed(Stage::CreateFiles, file.path, context)
        }
    }
}

/// Delete every legacy file. A file that is already gone is logged and
/// reported as skipped; it never stops the migration.
pub fn delete_legacy_files(project_dir: &Path) -> Vec<StageReport> {
    LEGACY_FILES
        .iter()
        .map(|file| delete_file(project_dir, file))
        .collect()
}

fn delete_file(project_dir: &Path, file: &str) -> StageReport {
    let path = project_dir.join(file);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            println!("✅ {}", format!("File {file} deleted").green());
            StageReport::applied(Stage::DeleteFiles, file)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!(target: "migration", "Problem with deleting file {}: {}", file, e);
            StageReport::skipped(Stage::DeleteFiles, file, "not found")
        }
        Err(e) => {
            tracing::error!(target: "migration", "Problem with deleting file {}: {}", file, e);
            let context = ErrorContext::new(MigrateError::FileSystemError {
                operation: "delete".to_string(),
                path: file.to_string(),
                reason: e.to_string(),
            })
            .with_suggestion(format!("Delete {file} by hand"));
            StageReport::failed(Stage::DeleteFiles, file, context)
        }
    }
}
