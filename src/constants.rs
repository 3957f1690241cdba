//! Fixed paths, package lists and file templates used by the migration.
//!
//! Every path is relative to the project directory. Keeping the templates
//! here lets tests assert on exact content without touching the file system.

use std::time::Duration;

/// The project manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// The Angular workspace descriptor.
pub const ANGULAR_JSON: &str = "angular.json";

/// The TypeScript configuration used to compile specs.
pub const TSCONFIG_SPEC_JSON: &str = "tsconfig.spec.json";

/// Empty mock module imported by the Jest setup file.
pub const JEST_GLOBAL_MOCK_PATH: &str = "src/jestGlobalMock.ts";

/// Jest setup file referenced from `jest.setupFilesAfterEnv`.
pub const SETUP_JEST_PATH: &str = "src/setupJest.ts";

/// Karma configuration removed by the migration.
pub const KARMA_CONF_PATH: &str = "karma.conf.js";

/// Karma bootstrap file. Also the entry stripped from `tsconfig.spec.json`.
pub const LEGACY_TEST_ENTRY: &str = "src/test.ts";

pub const JEST_GLOBAL_MOCK_CONTENT: &str = "";

pub const SETUP_JEST_CONTENT: &str = "import 'jest-preset-angular';\nimport './jestGlobalMock';\n";

/// Value written to `scripts.test`.
pub const JEST_TEST_SCRIPT: &str = "jest";

/// Top-level manifest key holding the Jest configuration.
pub const JEST_CONFIG_KEY: &str = "jest";

pub const JEST_PRESET: &str = "jest-preset-angular";

pub const JEST_SETUP_FILES_AFTER_ENV: &[&str] = &["<rootDir>/src/setupJest.ts"];

pub const JEST_ROOTS: &[&str] = &["src"];

pub const JEST_TEST_PATH_IGNORE_PATTERNS: &[&str] = &["<rootDir>/src/test.ts"];

/// Development dependencies added in the first install command.
pub const JEST_PACKAGES: &[&str] = &["jest", "jest-preset-angular"];

/// Karma and Jasmine packages removed in the second install command.
pub const KARMA_PACKAGES: &[&str] = &[
    "karma",
    "karma-chrome-launcher",
    "karma-coverage-istanbul-reporter",
    "karma-jasmine",
    "karma-jasmine-html-reporter",
];

/// Architect target removed from every workspace project.
pub const TEST_TARGET: &str = "test";

/// Project keys that may hold architect targets. `targets` is the newer alias.
pub const ARCHITECT_KEYS: &[&str] = &["architect", "targets"];

/// Compiler flags enabled once the Karma entry is gone from `files`.
pub const REQUIRED_COMPILER_FLAGS: &[&str] = &["esModuleInterop", "emitDecoratorMetadata"];

/// Spinner refresh interval while a package-manager command runs.
pub const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Environment variable that disables the spinner, mirrored by `--no-progress`.
pub const NO_PROGRESS_ENV: &str = "NG_JEST_MIGRATE_NO_PROGRESS";
