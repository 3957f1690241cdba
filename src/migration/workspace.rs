//! `angular.json` update: drop the Karma `test` target from every project.

use colored::Colorize;
use serde_json::Value;
use std::path::Path;

use super::report::{Stage, StageReport};
use super::{load_document, root_object, save_document};
use crate::constants::{ANGULAR_JSON, ARCHITECT_KEYS, TEST_TARGET};
use crate::core::{MigrateError, create_error_context};

/// Remove the `test` target from every project under `projects`.
///
/// Projects without an `architect` (or `targets`) object, or without a
/// `test` entry, are skipped. Returns the names of the projects that lost a
/// target, in document order.
///
/// # Errors
///
/// Returns [`MigrateError::InvalidStructure`] if the workspace root is not an object.
pub fn strip_test_targets(workspace: &mut Value) -> Result<Vec<String>, MigrateError> {
    let root = root_object(workspace, ANGULAR_JSON)?;
    let Some(projects) = root.get_mut("projects").and_then(Value::as_object_mut) else {
        tracing::debug!(target: "migration", "{} has no projects", ANGULAR_JSON);
        return Ok(Vec::new());
    };

    let mut stripped = Vec::new();
    for (name, project) in projects.iter_mut() {
        let mut removed = false;
        for key in ARCHITECT_KEYS {
            if let Some(targets) = project.get_mut(*key).and_then(Value::as_object_mut) {
                removed |= targets.shift_remove(TEST_TARGET).is_some();
            }
        }
        if removed {
            tracing::debug!(target: "migration", "Removed test target from project {}", name);
            stripped.push(name.clone());
        }
    }

    Ok(stripped)
}

/// Load, update and persist `angular.json` in `project_dir`.
pub fn update_workspace(project_dir: &Path) -> StageReport {
    let result = load_document(project_dir, ANGULAR_JSON).and_then(|mut workspace| {
        let stripped = strip_test_targets(&mut workspace)?;
        save_document(project_dir, ANGULAR_JSON, &workspace)?;
        Ok(stripped)
    });

    match result {
        Ok(stripped) => {
            tracing::info!(
                target: "migration",
                "Removed {} test target(s) from {}",
                stripped.len(),
                ANGULAR_JSON
            );
            println!("✅ {}", format!("File {ANGULAR_JSON} updated").green());
            StageReport::applied(Stage::UpdateWorkspace, ANGULAR_JSON)
        }
        Err(e) => {
            tracing::error!(target: "migration", "Problem with updating file {}: {}", ANGULAR_JSON, e);
            let context = create_error_context(e).with_suggestion(format!(
                "Remove the \"{TEST_TARGET}\" section from the architect of every project in {ANGULAR_JSON}"
            ));
            StageReport::failed(Stage::UpdateWorkspace, ANGULAR_JSON, context)
        }
    }
}
