//! Download pipeline.
//!
//! `Downloader` walks every assignment in order and writes its metadata and
//! attachments under the output root. What happens when a step fails is
//! decided by `FailureKind::policy`, the one place that decides which
//! failures abort the run, which are logged, and which are dropped.

pub mod orchestrator;
pub mod policy;
pub mod report;

pub use orchestrator::{
    Downloader, DESCRIPTION_PREFIX, DETAILED_METADATA_FILE, ROOT_DIR, SIMPLE_METADATA_FILE,
};
pub use policy::{FailureKind, FailurePolicy};
pub use report::{DownloadReport, Failure};
