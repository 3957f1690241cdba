use predicates::prelude::*;

use crate::common::{migrate_cmd, snapshot};
use ng_jest_migrate::test_utils::ProjectFixture;

#[test]
fn test_short_version_flag() {
    migrate_cmd()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_long_version_flag_touches_nothing() {
    let project = ProjectFixture::karma_app();
    let before = snapshot(project.path());

    migrate_cmd()
        .arg("--version")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ng-jest-migrate"));

    assert_eq!(snapshot(project.path()), before);
}

#[test]
fn test_help_lists_flags() {
    migrate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--install-timeout"))
        .stdout(predicate::str::contains("-v, --version"));
}

#[test]
fn test_dry_run_lists_plan_and_touches_nothing() {
    let project = ProjectFixture::karma_app();
    let before = snapshot(project.path());

    migrate_cmd()
        .arg("--dry-run")
        .arg("--path")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("npm i --save-dev jest jest-preset-angular"))
        .stdout(predicate::str::contains("delete karma.conf.js"))
        .stdout(predicate::str::contains("Dry run complete"));

    assert_eq!(snapshot(project.path()), before);
}

#[test]
fn test_missing_project_dir_exits_with_error() {
    let project = ProjectFixture::empty();

    migrate_cmd()
        .arg("--path")
        .arg(project.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project directory not found"));
}

#[test]
fn test_unknown_argument_is_usage_error() {
    migrate_cmd().arg("--frobnicate").assert().code(2);
}
