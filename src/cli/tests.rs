use super::*;
use clap::CommandFactory;
use clap::error::ErrorKind;

#[test]
fn test_cli_debug_assert() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_flags_runs_in_current_dir() {
    let cli = Cli::try_parse_from(["ng-jest-migrate"]).unwrap();
    let config = cli.build_config();

    assert_eq!(config.project_dir, PathBuf::from("."));
    assert!(!config.dry_run);
    assert_eq!(config.install_timeout, None);
    assert_eq!(config.log_level.as_deref(), Some("info"));
}

#[test]
fn test_short_version_flag() {
    let err = Cli::try_parse_from(["ng-jest-migrate", "-v"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);

    let err = Cli::try_parse_from(["ng-jest-migrate", "--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_all_flags() {
    let cli = Cli::try_parse_from([
        "ng-jest-migrate",
        "--path",
        "apps/web",
        "--dry-run",
        "--no-progress",
        "--install-timeout",
        "120",
        "--verbose",
    ])
    .unwrap();
    let config = cli.build_config();

    assert_eq!(config.project_dir, PathBuf::from("apps/web"));
    assert!(config.dry_run);
    assert!(!config.show_progress);
    assert_eq!(config.install_timeout, Some(Duration::from_secs(120)));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_quiet_logs_errors_only() {
    let cli = Cli::try_parse_from(["ng-jest-migrate", "-q"]).unwrap();
    assert_eq!(cli.build_config().log_level.as_deref(), Some("error"));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    let err = Cli::try_parse_from(["ng-jest-migrate", "--verbose", "--quiet"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_rejects_unknown_arguments() {
    assert!(Cli::try_parse_from(["ng-jest-migrate", "init"]).is_err());
    assert!(Cli::try_parse_from(["ng-jest-migrate", "--install-timeout", "soon"]).is_err());
}

#[tokio::test]
async fn test_missing_project_dir_is_an_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = MigrateConfig::new(temp.path().join("missing")).with_progress(false);

    let err = execute_with_config(config).await.unwrap_err();
    assert!(err.to_string().contains("Project directory not found"));
}

#[tokio::test]
async fn test_dry_run_succeeds_without_npm() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = MigrateConfig::new(temp.path()).with_dry_run(true);

    let status = execute_with_config(config).await.unwrap();
    assert_eq!(status, ExitStatus::Success);
}
