//! Spinner shown while package-manager commands run.
//!
//! The spinner is hidden when progress is disabled (`--no-progress` or the
//! `NG_JEST_MIGRATE_NO_PROGRESS` environment variable) and when stderr is not
//! a terminal, which indicatif detects on its own.
//!
//! # Example
//!
//! ```rust,no_run
//! use ng_jest_migrate::utils::progress::Spinner;
//!
//! let spinner = Spinner::start("npm i --save-dev jest", true);
//! spinner.println("added 312 packages");
//! drop(spinner); // tick stops and the line is cleared
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

use crate::constants::{NO_PROGRESS_ENV, SPINNER_TICK_INTERVAL};

/// Returns true if the environment asks for progress indicators to be hidden.
#[must_use]
pub fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some_and(|value| {
        let value = value.to_string_lossy().to_ascii_lowercase();
        !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
    })
}

/// An indeterminate spinner that owns its steady tick.
///
/// The tick is stopped and the line cleared exactly once: on [`Spinner::finish`]
/// or, failing that, when the spinner is dropped.
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    /// Start a spinner with `message`. When `enabled` is false the spinner is
    /// hidden but still accepts `println`, which then goes straight to stdout.
    pub fn start(message: impl Into<String>, enabled: bool) -> Self {
        let inner = if enabled && !is_progress_disabled() {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.set_message(message.into());
            bar.enable_steady_tick(SPINNER_TICK_INTERVAL);
            bar
        } else {
            IndicatifBar::hidden()
        };
        Self {
            inner,
        }
    }

    /// Print a line above the spinner without corrupting it.
    pub fn println(&self, line: impl AsRef<str>) {
        if self.inner.is_hidden() {
            println!("{}", line.as_ref());
        } else {
            self.inner.println(line);
        }
    }

    /// Stop the tick and clear the line.
    pub fn finish(self) {
        // Drop does the work
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            self.inner.finish_and_clear();
        }
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["|", "/", "-", "\\", "|"])
}
