//! File system helpers for reading and rewriting project files.
//!
//! Writes go through a temporary file in the destination directory followed
//! by a rename, so an interrupted run never leaves a half-written
//! `package.json` behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// # Errors
/// Returns an error if the path exists but is not a directory, or if it cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
        return Ok(());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Atomically writes `content` to `path`, creating the parent directory first.
///
/// An existing file keeps its permissions, and a symlink keeps pointing at
/// the rewritten target. New files get the usual `0666` minus umask on Unix.
///
/// # Errors
/// Returns an error if the temp file cannot be created, written, synced or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_symlink(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".ng-jest-migrate");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Passed to open(2), so the umask still applies
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut temp = builder
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    if let Ok(existing) = fs::metadata(&target) {
        fs::set_permissions(temp.path(), existing.permissions()).with_context(|| {
            format!("Failed to copy permissions of: {}", target.display())
        })?;
    }
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", target.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace file: {}", target.display()))?;

    tracing::trace!(target: "fs", "Wrote {} bytes to {}", content.len(), target.display());
    Ok(())
}

/// The file a write to `path` should land in: the symlink target when `path`
/// is a symlink, `path` itself otherwise.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve symlink: {}", path.display())),
        _ => Ok(path.to_path_buf()),
    }
}

/// Reads a whole text file.
///
/// # Errors
/// Returns an error with context if the file cannot be read
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Writes a text file atomically.
///
/// # Errors
/// Returns an error with context if the file cannot be written
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Reads and parses a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_text_file(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from file: {}", path.display()))
}

/// Serializes `data` the way npm and the Angular CLI do: 2-space indentation,
/// keys in document order, trailing newline.
///
/// # Errors
/// Returns an error if serialization fails
pub fn to_json_document<T>(data: &T) -> Result<String>
where
    T: serde::Serialize,
{
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}

/// Writes `data` as a pretty JSON document, atomically.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written
pub fn write_json_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: serde::Serialize,
{
    let json = to_json_document(data)?;
    write_text_file(path, &json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}
