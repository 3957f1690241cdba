//! ng-jest-migrate - move an Angular project's tests from Karma/Jasmine to Jest
//!
//! The migration is a single pass over a fixed checklist:
//!
//! 1. `npm i --save-dev jest jest-preset-angular`, then `npm uninstall` the Karma packages
//! 2. create `src/jestGlobalMock.ts` and `src/setupJest.ts`
//! 3. add a `jest` block to `package.json` and set `scripts.test` to `jest`
//! 4. remove the `test` architect target from every project in `angular.json`
//! 5. delete `karma.conf.js` and `src/test.ts`
//! 6. drop `src/test.ts` from `tsconfig.spec.json` and enable `esModuleInterop`
//!    and `emitDecoratorMetadata`
//!
//! A failed install stops the run. Every other step is best effort: a
//! failure is reported with the exact manual fix and the run continues.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing and the entry point used by `main`
//! - [`config`] - the settings of one run
//! - [`constants`] - fixed paths, package lists and file templates
//! - [`core`] - error types and user-facing error formatting
//! - [`installer`] - package-manager commands (step 1)
//! - [`migration`] - file stages (steps 2-6) and the coordinator
//! - [`utils`] - atomic writes, platform helpers, the spinner

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod migration;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
