//! Package-manager commands and the process runner behind them.
//!
//! [`PackageManager`] is the seam between the installer and the outside
//! world: run one command, stream its stdout, wait for it to exit.
//! [`NpmPackageManager`] is the real implementation; tests use a fake that
//! returns canned results.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::core::MigrateError;
use crate::utils::platform::{get_npm_command, locate_program};
use crate::utils::progress::Spinner;

/// One package-manager invocation, e.g. `npm i --save-dev jest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCommand {
    program: String,
    args: Vec<String>,
}

impl PackageCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `npm i --save-dev <packages>`
    pub fn install_dev<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Self::new("npm", ["i", "--save-dev"]);
        cmd.args.extend(packages.into_iter().map(Into::into));
        cmd
    }

    /// `npm uninstall <packages>`
    pub fn uninstall<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Self::new("npm", ["uninstall"]);
        cmd.args.extend(packages.into_iter().map(Into::into));
        cmd
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for PackageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What a successful command left on stderr. npm prints warnings there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stderr: String,
}

/// Runs package-manager commands.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Run `command` to completion, printing each stdout line through `output`.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`MigrateError`] if the command cannot be spawned,
    /// exits with a non-zero status, or exceeds the configured timeout.
    async fn run(
        &self,
        command: &PackageCommand,
        output: &Spinner,
    ) -> Result<CommandOutput, MigrateError>;
}

/// Runs commands with the system `npm` inside the project directory.
#[derive(Debug, Clone)]
pub struct NpmPackageManager {
    project_dir: PathBuf,
    timeout: Option<Duration>,
}

impl NpmPackageManager {
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            timeout: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl PackageManager for NpmPackageManager {
    async fn run(
        &self,
        command: &PackageCommand,
        output: &Spinner,
    ) -> Result<CommandOutput, MigrateError> {
        let start = Instant::now();
        let program = if command.program() == "npm" {
            get_npm_command()
        } else {
            command.program()
        };
        let program = locate_program(program)?;

        tracing::debug!(
            target: "installer",
            "Executing command: {} (in {})",
            command,
            self.project_dir.display()
        );

        let mut child = Command::new(&program)
            .args(command.args())
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MigrateError::CommandFailed {
                command: command.to_string(),
                code: None,
                stderr: format!("Failed to start {}: {e}", program.display()),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let finished = match self.timeout {
            Some(limit) => {
                if let Ok(result) =
                    tokio::time::timeout(limit, drive(&mut child, stdout, stderr, output)).await
                {
                    result
                } else {
                    tracing::warn!(
                        target: "installer",
                        "Command timed out after {} seconds: {}",
                        limit.as_secs(),
                        command
                    );
                    if let Err(e) = child.kill().await {
                        tracing::debug!(target: "installer", "Failed to kill child: {}", e);
                    }
                    return Err(MigrateError::CommandTimedOut {
                        command: command.to_string(),
                        seconds: limit.as_secs(),
                    });
                }
            }
            None => drive(&mut child, stdout, stderr, output).await,
        };

        let (status, stderr) = finished.map_err(|e| MigrateError::CommandFailed {
            command: command.to_string(),
            code: None,
            stderr: e.to_string(),
        })?;

        tracing::debug!(
            target: "installer",
            "{} exited with {:?} after {:.2}s",
            command,
            status.code(),
            start.elapsed().as_secs_f64()
        );

        if !status.success() {
            return Err(MigrateError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
                stderr,
            });
        }

        Ok(CommandOutput {
            stderr,
        })
    }
}

/// Stream stdout line by line while collecting stderr, then wait for exit.
/// Both pipes are drained concurrently so the child never blocks on a full pipe.
async fn drive(
    child: &mut Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    output: &Spinner,
) -> std::io::Result<(ExitStatus, String)> {
    let stream_stdout = async {
        if let Some(stdout) = stdout {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                output.println(line);
            }
        }
        Ok::<_, std::io::Error>(())
    };

    let collect_stderr = async {
        let mut buf = String::new();
        if let Some(mut stderr) = stderr {
            stderr.read_to_string(&mut buf).await?;
        }
        Ok::<_, std::io::Error>(buf)
    };

    let (streamed, collected, status) = tokio::join!(stream_stdout, collect_stderr, child.wait());
    streamed?;
    Ok((status?, collected?))
}
