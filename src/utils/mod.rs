//! Cross-platform utilities
//!
//! - [`fs`] - atomic writes and JSON document helpers
//! - [`platform`] - locating the package manager binary
//! - [`progress`] - the spinner shown while commands run

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, read_json_file, write_json_file};
pub use platform::{get_npm_command, is_windows, locate_program};
pub use progress::Spinner;
