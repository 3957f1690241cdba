//! Shared helpers for ng-jest-migrate integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// The binary under test, with progress disabled and logging left to the test.
pub fn migrate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ng-jest-migrate").unwrap();
    cmd.env("NG_JEST_MIGRATE_NO_PROGRESS", "1").env_remove("RUST_LOG");
    cmd
}

/// A directory holding a stand-in `npm` script, put first on `PATH`.
pub struct FakeNpm {
    dir: TempDir,
}

impl FakeNpm {
    /// An `npm` that logs its arguments to `npm.log` and exits with `exit_code`
    /// when the arguments start with `fail_on`.
    #[cfg(unix)]
    pub fn new(fail_on: Option<&str>, exit_code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let log = dir.path().join("npm.log");
        let fail_check = match fail_on {
            Some(prefix) => format!(
                "case \"$*\" in\n  \"{prefix}\"*) echo \"npm ERR! simulated failure\" >&2; exit {exit_code} ;;\nesac\n"
            ),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\necho \"$*\" >> \"{}\"\n{fail_check}echo \"added 1 package\"\necho \"npm WARN deprecated\" >&2\nexit 0\n",
            log.display()
        );

        let npm = dir.path().join("npm");
        fs::write(&npm, script).unwrap();
        fs::set_permissions(&npm, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            dir,
        }
    }

    /// A `PATH` value with the fake npm first.
    pub fn path_env(&self) -> String {
        let mut paths = vec![self.dir.path().to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).unwrap().to_string_lossy().into_owned()
    }

    /// Every invocation's arguments, one line per call.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("npm.log")
    }
}

/// Snapshot of every file in `dir`, for asserting that nothing changed.
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .map(Result::unwrap)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}
