//! ng-jest-migrate CLI entry point
//!
//! Parses arguments, runs the migration and maps its outcome to an exit code:
//! `0` on success, `1` when dependency installation fails, `3` when the run
//! finished but some files need to be fixed by hand.

use clap::Parser;
use ng_jest_migrate::cli;
use ng_jest_migrate::core::user_friendly_error;
use ng_jest_migrate::migration::ExitStatus;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(ExitStatus::Fatal.code());
        }
    }
}
