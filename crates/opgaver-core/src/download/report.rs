use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::FailureKind;

/// A logged failure from a run.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Title of the assignment being processed, if any
    pub assignment: Option<String>,
    pub kind: FailureKind,
    pub message: String,
}

/// Summary of one run of the download pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    pub root: PathBuf,
    pub assignments: usize,
    pub metadata_files: usize,
    pub attachments: usize,
    /// Failures dropped by a `Silent` policy
    pub suppressed: usize,
    pub failures: Vec<Failure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl DownloadReport {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            assignments: 0,
            metadata_files: 0,
            attachments: 0,
            suppressed: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// True when nothing was logged or suppressed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.suppressed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_clean() {
        let report = DownloadReport::new(PathBuf::from("Opgaver"));
        assert!(report.is_clean());
        assert!(report.finished_at.is_none());
    }

    #[test]
    fn test_elapsed_after_finish() {
        let mut report = DownloadReport::new(PathBuf::from("Opgaver"));
        report.started_at = Utc::now() - Duration::seconds(90);
        report.finish();
        assert!(report.elapsed() >= Duration::seconds(90));
    }

    #[test]
    fn test_suppressed_failure_is_not_clean() {
        let mut report = DownloadReport::new(PathBuf::from("Opgaver"));
        report.suppressed = 1;
        assert!(!report.is_clean());
    }
}
