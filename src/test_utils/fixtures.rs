//! A temporary Angular project set up for Karma, the starting point of every
//! migration test.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::MigrateConfig;

pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub const KARMA_PACKAGE_JSON: &'static str = r#"{
  "name": "karma-app",
  "version": "0.0.0",
  "scripts": {
    "ng": "ng",
    "start": "ng serve",
    "test": "karma start"
  },
  "private": true,
  "devDependencies": {
    "karma": "~6.4.0",
    "karma-jasmine": "~5.1.0"
  }
}
"#;

    /// Two projects: `karma-app` has a Karma test target, `karma-app-e2e` has no architect at all.
    pub const KARMA_ANGULAR_JSON: &'static str = r#"{
  "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
  "version": 1,
  "projects": {
    "karma-app": {
      "root": "",
      "architect": {
        "build": {
          "builder": "@angular-devkit/build-angular:browser"
        },
        "test": {
          "builder": "@angular-devkit/build-angular:karma",
          "options": {
            "main": "src/test.ts",
            "karmaConfig": "karma.conf.js"
          }
        }
      }
    },
    "karma-app-e2e": {
      "root": "e2e"
    }
  }
}
"#;

    pub const KARMA_TSCONFIG_SPEC_JSON: &'static str = r#"{
  "extends": "./tsconfig.json",
  "compilerOptions": {
    "outDir": "./out-tsc/spec",
    "types": ["jasmine", "node"]
  },
  "files": ["src/test.ts", "src/polyfills.ts"],
  "include": ["src/**/*.spec.ts", "src/**/*.d.ts"]
}
"#;

    pub const KARMA_CONF_JS: &'static str = "module.exports = function (config) {};\n";

    pub const KARMA_TEST_TS: &'static str = "import 'zone.js/testing';\n";

    /// An empty project directory.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A project with every file the migration reads or deletes.
    #[must_use]
    pub fn karma_app() -> Self {
        let fixture = Self::empty();
        fixture.write("package.json", Self::KARMA_PACKAGE_JSON);
        fixture.write("angular.json", Self::KARMA_ANGULAR_JSON);
        fixture.write("tsconfig.spec.json", Self::KARMA_TSCONFIG_SPEC_JSON);
        fixture.write("karma.conf.js", Self::KARMA_CONF_JS);
        fixture.write("src/test.ts", Self::KARMA_TEST_TS);
        fixture
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A config pointing at this project with the spinner disabled.
    #[must_use]
    pub fn config(&self) -> MigrateConfig {
        MigrateConfig::new(self.path()).with_progress(false)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, content).expect("failed to write fixture file");
    }

    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("failed to read fixture file")
    }

    #[must_use]
    pub fn json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).expect("fixture file is not valid JSON")
    }

    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }
}
