//! Integration test suite for ng-jest-migrate
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **cli**: flags, exit codes and output of the binary
//! - **end_to_end**: full migrations of a Karma project, through the
//!   library API with a fake package manager and through the binary with a
//!   fake `npm` on `PATH`

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod end_to_end;
