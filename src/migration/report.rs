//! Per-step results collected by the migration coordinator.

use colored::Colorize;
use std::fmt;

use crate::core::ErrorContext;

/// The six stages of a migration, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    InstallDependencies,
    CreateFiles,
    UpdateManifest,
    UpdateWorkspace,
    DeleteFiles,
    UpdateCompilerConfig,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::InstallDependencies,
        Self::CreateFiles,
        Self::UpdateManifest,
        Self::UpdateWorkspace,
        Self::DeleteFiles,
        Self::UpdateCompilerConfig,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InstallDependencies => "install dependencies",
            Self::CreateFiles => "create files",
            Self::UpdateManifest => "update manifest",
            Self::UpdateWorkspace => "update workspace",
            Self::DeleteFiles => "delete files",
            Self::UpdateCompilerConfig => "update compiler config",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum StageOutcome {
    /// The file was written or deleted.
    Applied,
    /// Nothing needed to change; the file was left untouched.
    Unchanged,
    /// The step did not apply, e.g. a file to delete was already gone.
    Skipped {
        reason: String,
    },
    /// The step failed and needs a manual fix.
    Failed(ErrorContext),
}

/// The result of one step of one stage, tied to the file it touched.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub target: String,
    pub outcome: StageOutcome,
}

impl StageReport {
    pub fn applied(stage: Stage, target: impl Into<String>) -> Self {
        Self {
            stage,
            target: target.into(),
            outcome: StageOutcome::Applied,
        }
    }

    pub fn unchanged(stage: Stage, target: impl Into<String>) -> Self {
        Self {
            stage,
            target: target.into(),
            outcome: StageOutcome::Unchanged,
        }
    }

    pub fn skipped(stage: Stage, target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage,
            target: target.into(),
            outcome: StageOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(stage: Stage, target: impl Into<String>, context: ErrorContext) -> Self {
        Self {
            stage,
            target: target.into(),
            outcome: StageOutcome::Failed(context),
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, StageOutcome::Failed(_))
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self.outcome, StageOutcome::Applied)
    }
}

/// How the process should exit once the migration has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every step succeeded, was unchanged or was skipped.
    Success,
    /// Dependency installation failed; no file was touched.
    Fatal,
    /// The run finished but some steps need manual remediation.
    Incomplete,
}

impl ExitStatus {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Fatal => 1,
            Self::Incomplete => 3,
        }
    }
}

/// Every report produced by a run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct MigrationSummary {
    pub reports: Vec<StageReport>,
}

impl MigrationSummary {
    pub fn push(&mut self, report: StageReport) {
        self.reports.push(report);
    }

    pub fn extend(&mut self, reports: impl IntoIterator<Item = StageReport>) {
        self.reports.extend(reports);
    }

    pub fn failures(&self) -> impl Iterator<Item = &StageReport> {
        self.reports.iter().filter(|r| r.is_failure())
    }

    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &StageReport> {
        self.reports.iter().filter(move |r| r.stage == stage)
    }

    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        if self.failures().next().is_some() {
            ExitStatus::Incomplete
        } else {
            ExitStatus::Success
        }
    }

    /// Print one line per step followed by the remediation for each failure.
    pub fn print(&self) {
        println!("\n{}", "Migration summary".bold());
        for report in &self.reports {
            let line = match &report.outcome {
                StageOutcome::Applied => format!("  ✅ {}: {}", report.stage, report.target),
                StageOutcome::Unchanged => {
                    format!("  ✅ {}: {} (unchanged)", report.stage, report.target)
                }
                StageOutcome::Skipped {
                    reason,
                } => format!("  ⏭  {}: {} ({reason})", report.stage, report.target)
                    .yellow()
                    .to_string(),
                StageOutcome::Failed(_) => {
                    format!("  ❌ {}: {}", report.stage, report.target).red().to_string()
                }
            };
            println!("{line}");
        }

        let failures: Vec<_> = self.failures().collect();
        if failures.is_empty() {
            println!("\n🎉 {}", "Migration completed successfully!".green().bold());
            println!(
                "\n💡 Next steps:\n  • Run {} to check that your specs pass\n  • Commit the changes to version control",
                "npm test".cyan()
            );
        } else {
            println!(
                "\n{}",
                format!("{} step(s) need to be finished by hand:", failures.len()).yellow().bold()
            );
            for report in failures {
                if let StageOutcome::Failed(context) = &report.outcome {
                    context.display();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MigrateError;

    fn failure() -> StageReport {
        StageReport::failed(
            Stage::UpdateWorkspace,
            "angular.json",
            ErrorContext::new(MigrateError::ParseError {
                file: "angular.json".to_string(),
                reason: "eof".to_string(),
            }),
        )
    }

    #[test]
    fn test_exit_status_success_with_skips() {
        let mut summary = MigrationSummary::default();
        summary.push(StageReport::applied(Stage::CreateFiles, "src/setupJest.ts"));
        summary.push(StageReport::unchanged(Stage::UpdateCompilerConfig, "tsconfig.spec.json"));
        summary.push(StageReport::skipped(Stage::DeleteFiles, "karma.conf.js", "not found"));

        assert_eq!(summary.exit_status(), ExitStatus::Success);
        assert_eq!(summary.exit_status().code(), 0);
    }

    #[test]
    fn test_exit_status_incomplete_on_failure() {
        let mut summary = MigrationSummary::default();
        summary.push(StageReport::applied(Stage::UpdateManifest, "package.json"));
        summary.push(failure());

        assert_eq!(summary.exit_status(), ExitStatus::Incomplete);
        assert_eq!(summary.failures().count(), 1);
        assert_eq!(summary.for_stage(Stage::UpdateManifest).count(), 1);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [ExitStatus::Success, ExitStatus::Fatal, ExitStatus::Incomplete].map(ExitStatus::code);
        assert_eq!(codes, [0, 1, 3]);
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::ALL[0], Stage::InstallDependencies);
        assert_eq!(Stage::ALL[5], Stage::UpdateCompilerConfig);
        assert_eq!(Stage::UpdateCompilerConfig.to_string(), "update compiler config");
    }
}
