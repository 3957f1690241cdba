//! `package.json` update: add the `jest` block and point `scripts.test` at Jest.

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use super::report::{Stage, StageReport};
use super::{load_document, root_object, save_document};
use crate::constants::{
    JEST_CONFIG_KEY, JEST_PRESET, JEST_ROOTS, JEST_SETUP_FILES_AFTER_ENV,
    JEST_TEST_PATH_IGNORE_PATTERNS, JEST_TEST_SCRIPT, PACKAGE_JSON,
};
use crate::core::{ErrorContext, MigrateError, create_error_context};

/// The `jest` section written to `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JestConfig {
    pub preset: String,
    pub setup_files_after_env: Vec<String>,
    pub roots: Vec<String>,
    pub test_path_ignore_patterns: Vec<String>,
}

impl Default for JestConfig {
    fn default() -> Self {
        Self {
            preset: JEST_PRESET.to_string(),
            setup_files_after_env: JEST_SETUP_FILES_AFTER_ENV.iter().map(ToString::to_string).collect(),
            roots: JEST_ROOTS.iter().map(ToString::to_string).collect(),
            test_path_ignore_patterns: JEST_TEST_PATH_IGNORE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl JestConfig {
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The block as it would appear in `package.json`, for manual remediation.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Set `jest` to the fixed block and `scripts.test` to `jest`.
///
/// An existing `jest` key is replaced in place so key order is stable across
/// runs. A missing `scripts` object is created.
///
/// # Errors
///
/// Returns [`MigrateError::InvalidStructure`] if the manifest or its
/// `scripts` entry is not an object.
pub fn apply_jest_config(manifest: &mut Value, jest: &JestConfig) -> Result<(), MigrateError> {
    let root = root_object(manifest, PACKAGE_JSON)?;
    root.insert(JEST_CONFIG_KEY.to_string(), jest.to_value());

    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(scripts) = scripts.as_object_mut() else {
        return Err(MigrateError::InvalidStructure {
            file: PACKAGE_JSON.to_string(),
            reason: "\"scripts\" is not an object".to_string(),
        });
    };
    scripts.insert("test".to_string(), Value::String(JEST_TEST_SCRIPT.to_string()));

    Ok(())
}

/// Load, update and persist `package.json` in `project_dir`.
pub fn update_manifest(project_dir: &Path) -> StageReport {
    let jest = JestConfig::default();

    let mut manifest = match load_document(project_dir, PACKAGE_JSON) {
        Ok(manifest) => manifest,
        Err(e) => return failure(e, &jest),
    };

    if let Err(e) = apply_jest_config(&mut manifest, &jest) {
        return failure(e, &jest);
    }

    match save_document(project_dir, PACKAGE_JSON, &manifest) {
        Ok(()) => {
            println!("✅ {}", format!("File {PACKAGE_JSON} updated").green());
            StageReport::applied(Stage::UpdateManifest, PACKAGE_JSON)
        }
        Err(e) => failure(e, &jest),
    }
}

fn failure(error: MigrateError, jest: &JestConfig) -> StageReport {
    tracing::error!(target: "migration", "Problem with updating file {}: {}", PACKAGE_JSON, error);
    let context = ErrorContext {
        suggestion: Some(format!(
            "Add the following to {PACKAGE_JSON} and change scripts.test to \"{JEST_TEST_SCRIPT}\""
        )),
        details: Some(format!("\"{JEST_CONFIG_KEY}\": {}", jest.to_pretty_string())),
        ..create_error_context(error)
    };
    StageReport::failed(Stage::UpdateManifest, PACKAGE_JSON, context)
}
