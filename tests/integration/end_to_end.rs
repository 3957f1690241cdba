use ng_jest_migrate::migration::{ExitStatus, Migration, Stage, StageOutcome};
use ng_jest_migrate::test_utils::{FakePackageManager, ProjectFixture, init_test_logging};
use serde_json::json;

#[tokio::test]
async fn test_full_migration_of_karma_app() {
    init_test_logging(None);
    let project = ProjectFixture::karma_app();
    let pm = FakePackageManager::succeeding().with_stderr("npm WARN deprecated inflight@1.0.6");

    let summary = Migration::new(project.config()).run_with(&pm).await.unwrap();

    assert_eq!(summary.exit_status(), ExitStatus::Success);
    assert_eq!(
        pm.calls(),
        [
            "npm i --save-dev jest jest-preset-angular",
            "npm uninstall karma karma-chrome-launcher karma-coverage-istanbul-reporter karma-jasmine karma-jasmine-html-reporter",
        ]
    );

    // Bootstrap files
    assert_eq!(project.read("src/jestGlobalMock.ts"), "");
    assert_eq!(
        project.read("src/setupJest.ts"),
        "import 'jest-preset-angular';\nimport './jestGlobalMock';\n"
    );

    // Manifest
    let manifest = project.json("package.json");
    assert_eq!(manifest["scripts"]["test"], "jest");
    assert_eq!(manifest["scripts"]["start"], "ng serve");
    assert_eq!(manifest["jest"]["roots"], json!(["src"]));
    assert_eq!(manifest["jest"]["preset"], "jest-preset-angular");

    // Workspace: one project had a test target, the other had no architect
    let workspace = project.json("angular.json");
    assert!(workspace["projects"]["karma-app"]["architect"].get("test").is_none());
    assert!(workspace["projects"]["karma-app"]["architect"].get("build").is_some());
    assert_eq!(workspace["projects"]["karma-app-e2e"], json!({"root": "e2e"}));

    // Legacy files
    assert!(!project.exists("karma.conf.js"));
    assert!(!project.exists("src/test.ts"));

    // Compiler config
    let tsconfig = project.json("tsconfig.spec.json");
    assert_eq!(tsconfig["files"], json!(["src/polyfills.ts"]));
    assert_eq!(tsconfig["compilerOptions"]["esModuleInterop"], true);
    assert_eq!(tsconfig["compilerOptions"]["emitDecoratorMetadata"], true);
    assert_eq!(tsconfig["compilerOptions"]["outDir"], "./out-tsc/spec");
}

#[tokio::test]
async fn test_minimal_manifest_scenario() {
    let project = ProjectFixture::karma_app();
    project.write("package.json", r#"{"scripts":{"test":"karma start"}}"#);

    Migration::new(project.config())
        .run_with(&FakePackageManager::succeeding())
        .await
        .unwrap();

    let manifest = project.json("package.json");
    assert_eq!(manifest["scripts"]["test"], "jest");
    assert_eq!(manifest["jest"]["roots"], json!(["src"]));
    assert_eq!(
        project.read("package.json"),
        r#"{
  "scripts": {
    "test": "jest"
  },
  "jest": {
    "preset": "jest-preset-angular",
    "setupFilesAfterEnv": [
      "<rootDir>/src/setupJest.ts"
    ],
    "roots": [
      "src"
    ],
    "testPathIgnorePatterns": [
      "<rootDir>/src/test.ts"
    ]
  }
}
"#
    );
}

#[tokio::test]
async fn test_second_run_on_migrated_project() {
    let project = ProjectFixture::karma_app();
    let pm = FakePackageManager::succeeding();

    Migration::new(project.config()).run_with(&pm).await.unwrap();
    let manifest = project.read("package.json");
    let tsconfig = project.read("tsconfig.spec.json");

    let summary = Migration::new(project.config()).run_with(&pm).await.unwrap();

    // Nothing left to delete and nothing to change in the compiler config
    assert_eq!(summary.exit_status(), ExitStatus::Success);
    assert!(
        summary
            .for_stage(Stage::DeleteFiles)
            .all(|r| matches!(r.outcome, StageOutcome::Skipped { .. }))
    );
    assert!(
        summary
            .for_stage(Stage::UpdateCompilerConfig)
            .all(|r| matches!(r.outcome, StageOutcome::Unchanged))
    );
    assert_eq!(project.read("package.json"), manifest);
    assert_eq!(project.read("tsconfig.spec.json"), tsconfig);
}

#[tokio::test]
async fn test_missing_config_files_are_reported_not_fatal() {
    let project = ProjectFixture::empty();

    let summary = Migration::new(project.config())
        .run_with(&FakePackageManager::succeeding())
        .await
        .unwrap();

    assert_eq!(summary.exit_status(), ExitStatus::Incomplete);
    let failed: Vec<_> = summary.failures().map(|r| r.target.as_str()).collect();
    assert_eq!(failed, ["package.json", "angular.json", "tsconfig.spec.json"]);
    // The bootstrap files are still created
    assert!(project.exists("src/setupJest.ts"));
}

#[tokio::test]
async fn test_uninstall_failure_stops_the_run() {
    let project = ProjectFixture::karma_app();
    let pm = FakePackageManager::failing_at(1);

    let err = Migration::new(project.config()).run_with(&pm).await.unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(pm.calls().len(), 2);
    assert!(project.exists("karma.conf.js"));
    assert!(!project.exists("src/setupJest.ts"));
    assert_eq!(project.read("package.json"), ProjectFixture::KARMA_PACKAGE_JSON);
}

#[cfg(unix)]
mod binary {
    use predicates::prelude::*;

    use crate::common::{FakeNpm, migrate_cmd, snapshot};
    use ng_jest_migrate::test_utils::ProjectFixture;

    #[test]
    fn test_binary_runs_full_migration_with_npm_on_path() {
        let project = ProjectFixture::karma_app();
        let npm = FakeNpm::new(None, 0);

        migrate_cmd()
            .current_dir(project.path())
            .env("PATH", npm.path_env())
            .assert()
            .success()
            .stdout(predicate::str::contains("added 1 package"))
            .stdout(predicate::str::contains("Migration completed successfully"))
            .stderr(predicate::str::contains("npm WARN deprecated"));

        assert_eq!(
            npm.invocations(),
            [
                "i --save-dev jest jest-preset-angular",
                "uninstall karma karma-chrome-launcher karma-coverage-istanbul-reporter karma-jasmine karma-jasmine-html-reporter",
            ]
        );
        assert_eq!(project.json("package.json")["scripts"]["test"], "jest");
        assert!(!project.exists("karma.conf.js"));
    }

    #[test]
    fn test_binary_install_failure_exits_1_and_touches_nothing() {
        let project = ProjectFixture::karma_app();
        let npm = FakeNpm::new(Some("i --save-dev"), 7);
        let before = snapshot(project.path());

        migrate_cmd()
            .arg("--path")
            .arg(project.path())
            .env("PATH", npm.path_env())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Command failed: npm i --save-dev"))
            .stderr(predicate::str::contains("simulated failure"));

        assert_eq!(npm.invocations().len(), 1);
        assert_eq!(snapshot(project.path()), before);
    }

    #[test]
    fn test_binary_incomplete_run_exits_3() {
        let project = ProjectFixture::karma_app();
        project.write("angular.json", "{ broken");
        let npm = FakeNpm::new(None, 0);

        migrate_cmd()
            .arg("--path")
            .arg(project.path())
            .env("PATH", npm.path_env())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("angular.json"));

        // Later stages still ran
        assert!(!project.exists("src/test.ts"));
        assert!(!project.read("tsconfig.spec.json").contains("src/test.ts"));
    }
}
