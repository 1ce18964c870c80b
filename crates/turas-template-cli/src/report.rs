//! Outcome reporting for batch generation
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Every requested workbook was written |
//! | 1 | At least one workbook failed; the others were still attempted |

use std::path::PathBuf;
use std::process;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl ExitCode {
    pub fn from_failure_count(count: usize) -> Self {
        if count > 0 {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

/// What a `generate` run produced
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// (template label, error message)
    pub failed: Vec<(String, String)>,
}

impl GenerationReport {
    pub fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn record_failure(&mut self, label: impl Into<String>, error: impl ToString) {
        self.failed.push((label.into(), error.to_string()));
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from_failure_count(self.failed.len())
    }

    /// One-line tally printed after the per-file lines
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("{} template(s) generated", self.written.len())
        } else {
            format!(
                "{} template(s) generated, {} failed",
                self.written.len(),
                self.failed.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_failures_is_success() {
        assert_eq!(ExitCode::from_failure_count(0), ExitCode::Success);
        assert!(ExitCode::from_failure_count(0).is_success());
    }

    #[test]
    fn any_failure_is_failure() {
        assert_eq!(ExitCode::from_failure_count(1), ExitCode::Failure);
        assert_eq!(ExitCode::from_failure_count(7), ExitCode::Failure);
    }

    #[test]
    fn report_keeps_going_after_a_failure() {
        let mut report = GenerationReport::default();
        report.record_written(PathBuf::from("templates/Pricing.xlsx"));
        report.record_failure("broken", "Duplicate sheet name 'Settings'");
        report.record_written(PathBuf::from("templates/Segment.xlsx"));

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.exit_code(), ExitCode::Failure);
        assert_eq!(report.summary(), "2 template(s) generated, 1 failed");
    }

    #[test]
    fn clean_summary() {
        let mut report = GenerationReport::default();
        report.record_written(PathBuf::from("a.xlsx"));
        assert_eq!(report.summary(), "1 template(s) generated");
        assert!(report.exit_code().is_success());
    }
}
