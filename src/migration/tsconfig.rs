//! `tsconfig.spec.json` update: drop the Karma bootstrap entry and enable
//! the compiler flags Jest needs.
//!
//! The update only happens when `files` still lists `src/test.ts`. Otherwise
//! the file is assumed to be migrated already and is left byte-for-byte as is.

use colored::Colorize;
use serde_json::{Map, Value};
use std::path::Path;

use super::report::{Stage, StageReport};
use super::{load_document, root_object, save_document};
use crate::constants::{LEGACY_TEST_ENTRY, REQUIRED_COMPILER_FLAGS, TSCONFIG_SPEC_JSON};
use crate::core::{MigrateError, create_error_context};

/// Remove the first `src/test.ts` entry from `files` and set the required
/// compiler flags. Returns `false`, without touching anything, if the entry
/// is not present.
///
/// # Errors
///
/// Returns [`MigrateError::InvalidStructure`] if the root or `compilerOptions`
/// is not an object.
pub fn drop_legacy_entry(config: &mut Value) -> Result<bool, MigrateError> {
    let root = root_object(config, TSCONFIG_SPEC_JSON)?;

    let index = root
        .get("files")
        .and_then(Value::as_array)
        .and_then(|files| files.iter().position(|f| f.as_str() == Some(LEGACY_TEST_ENTRY)));
    let Some(index) = index else {
        return Ok(false);
    };

    // Validate before mutating so a bad compilerOptions leaves the document intact
    if root.get("compilerOptions").is_some_and(|o| !o.is_object()) {
        return Err(MigrateError::InvalidStructure {
            file: TSCONFIG_SPEC_JSON.to_string(),
            reason: "\"compilerOptions\" is not an object".to_string(),
        });
    }

    if let Some(files) = root.get_mut("files").and_then(Value::as_array_mut) {
        files.remove(index);
    }

    let options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(options) = options.as_object_mut() {
        for flag in REQUIRED_COMPILER_FLAGS {
            options.insert((*flag).to_string(), Value::Bool(true));
        }
    }

    Ok(true)
}

/// Load, update and persist `tsconfig.spec.json` in `project_dir`.
pub fn update_compiler_config(project_dir: &Path) -> StageReport {
    let result = load_document(project_dir, TSCONFIG_SPEC_JSON).and_then(|mut config| {
        if !drop_legacy_entry(&mut config)? {
            return Ok(false);
        }
        save_document(project_dir, TSCONFIG_SPEC_JSON, &config)?;
        Ok(true)
    });

    match result {
        Ok(true) => {
            println!("✅ {}", format!("File {TSCONFIG_SPEC_JSON} updated").green());
            StageReport::applied(Stage::UpdateCompilerConfig, TSCONFIG_SPEC_JSON)
        }
        Ok(false) => {
            tracing::info!(
                target: "migration",
                "{} does not list {}, leaving it unchanged",
                TSCONFIG_SPEC_JSON,
                LEGACY_TEST_ENTRY
            );
            StageReport::unchanged(Stage::UpdateCompilerConfig, TSCONFIG_SPEC_JSON)
        }
        Err(e) => {
            tracing::error!(
                target: "migration",
                "Problem with updating file {}: {}",
                TSCONFIG_SPEC_JSON,
                e
            );
            let flags = REQUIRED_COMPILER_FLAGS
                .iter()
                .map(|flag| format!("\"{flag}\": true"))
                .collect::<Vec<_>>()
                .join(" and ");
            let context = create_error_context(e).with_suggestion(format!(
                "In {TSCONFIG_SPEC_JSON}, remove \"{LEGACY_TEST_ENTRY}\" from the files section and add {flags} to compilerOptions"
            ));
            StageReport::failed(Stage::UpdateCompilerConfig, TSCONFIG_SPEC_JSON, context)
        }
    }
}
