use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::PortalClient;
use crate::auth::Session;
use crate::fs;
use crate::models::{AssignmentSummary, Attachment};
use crate::progress::ProgressReporter;

use super::{DownloadReport, Failure, FailureKind, FailurePolicy};

// ============================================================================
// Constants
// ============================================================================

/// Default output root, relative to the working directory
pub const ROOT_DIR: &str = "Opgaver";

pub const SIMPLE_METADATA_FILE: &str = "simple_metadata.json";

pub const DETAILED_METADATA_FILE: &str = "detailed_metadata.json";

/// Prefix for the assignment description file, to keep it apart from
/// submission documents with the same name
pub const DESCRIPTION_PREFIX: &str = "Opgave_";

/// Downloads every assignment visible to an authenticated session.
///
/// Assignments and attachments are processed one at a time, in listing order.
pub struct Downloader<'a, C: ?Sized> {
    client: &'a C,
    session: &'a Session,
    root: PathBuf,
}

impl<'a, C> Downloader<'a, C>
where
    C: PortalClient + ?Sized,
{
    pub fn new(client: &'a C, session: &'a Session) -> Self {
        Self {
            client,
            session,
            root: PathBuf::from(ROOT_DIR),
        }
    }

    /// Write under `root` instead of `./Opgaver`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Run the whole pipeline.
    ///
    /// Returns an error only for failures whose policy is `Fatal`. In that case
    /// the tree is left as far as it got and `progress` is not stopped.
    pub async fn run<P>(&self, progress: &mut P) -> Result<DownloadReport>
    where
        P: ProgressReporter + ?Sized,
    {
        let mut report = DownloadReport::new(self.root.clone());

        let listing = self.client.list_assignments(self.session).await;
        let assignments = settle(&mut report, FailureKind::ListAssignments, None, listing)?
            .unwrap_or_default();
        info!(count = assignments.len(), root = %self.root.display(), "Downloading assignments");
        progress.start(assignments.len() as u64);

        let created = fs::ensure_dir(&self.root).await;
        settle(&mut report, FailureKind::CreateDirectory, None, created)?;

        for summary in &assignments {
            self.download_assignment(summary, &mut report).await?;
            report.assignments += 1;
            progress.increment();
        }

        progress.stop();
        report.finish();
        info!(
            assignments = report.assignments,
            attachments = report.attachments,
            failures = report.failures.len(),
            suppressed = report.suppressed,
            "Download finished"
        );
        Ok(report)
    }

    async fn download_assignment(
        &self,
        summary: &AssignmentSummary,
        report: &mut DownloadReport,
    ) -> Result<()> {
        let title = summary.title.as_str();
        debug!(id = %summary.id(), title, "Processing assignment");

        let detail = self.client.assignment_detail(self.session, &summary.id()).await;
        let Some(detail) = settle(report, FailureKind::AssignmentDetail, Some(title), detail)? else {
            return Ok(());
        };

        let dir = self.root.join(title);
        let created = fs::ensure_dir(&dir).await;
        if settle(report, FailureKind::CreateDirectory, Some(title), created)?.is_none() {
            return Ok(());
        }

        let written = fs::write_json(dir.join(SIMPLE_METADATA_FILE), summary).await;
        if settle(report, FailureKind::MetadataWrite, Some(title), written)?.is_some() {
            report.metadata_files += 1;
        }
        let written = fs::write_json(dir.join(DETAILED_METADATA_FILE), &detail).await;
        if settle(report, FailureKind::MetadataWrite, Some(title), written)?.is_some() {
            report.metadata_files += 1;
        }

        if let Some(description) = &detail.description {
            let target = dir.join(format!("{}{}", DESCRIPTION_PREFIX, description.filename));
            self.save_attachment(description, &target, FailureKind::DescriptionFetch, title, report)
                .await?;
        }

        for document in detail.documents() {
            let target = dir.join(&document.filename);
            self.save_attachment(document, &target, FailureKind::SubmissionFetch, title, report)
                .await?;
        }

        Ok(())
    }

    async fn save_attachment(
        &self,
        attachment: &Attachment,
        target: &Path,
        fetch_kind: FailureKind,
        title: &str,
        report: &mut DownloadReport,
    ) -> Result<()> {
        let fetched = self.client.fetch(self.session, &attachment.url).await;
        let Some(file) = settle(report, fetch_kind, Some(title), fetched)? else {
            return Ok(());
        };

        let written = fs::write_file(target, &file.bytes).await;
        if settle(report, FailureKind::AttachmentWrite, Some(title), written)?.is_some() {
            debug!(path = %target.display(), size = file.bytes.len(), "Attachment saved");
            report.attachments += 1;
        }
        Ok(())
    }
}

/// Apply the failure policy for `kind` to `result`.
///
/// `Ok(Some(value))` on success, `Ok(None)` when the failure is tolerated,
/// `Err` when the policy is `Fatal`.
fn settle<T, E>(
    report: &mut DownloadReport,
    kind: FailureKind,
    assignment: Option<&str>,
    result: Result<T, E>,
) -> Result<Option<T>>
where
    E: Into<anyhow::Error>,
{
    let error = match result {
        Ok(value) => return Ok(Some(value)),
        Err(e) => e.into(),
    };

    match kind.policy() {
        FailurePolicy::Fatal => Err(match assignment {
            Some(title) => error.context(format!("Failed to {} for '{}'", kind, title)),
            None => error.context(format!("Failed to {}", kind)),
        }),
        FailurePolicy::Logged => {
            warn!(assignment, %kind, error = %format!("{:#}", error), "Download step failed");
            report.failures.push(Failure {
                assignment: assignment.map(str::to_string),
                kind,
                message: format!("{:#}", error),
            });
            Ok(None)
        }
        FailurePolicy::Silent => {
            debug!(assignment, %kind, error = %format!("{:#}", error), "Ignoring failure");
            report.suppressed += 1;
            Ok(None)
        }
    }
}
