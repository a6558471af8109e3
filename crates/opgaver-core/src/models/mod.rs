//! Data models for Lectio entities.
//!
//! - `School`: an entry from the school listing
//! - `AssignmentSummary`: one row of the assignment listing
//! - `AssignmentDetail`, `Submission`, `Attachment`: the per-assignment detail
//! - `DownloadedFile`: raw bytes and headers of a fetched attachment
//!
//! Field names on the wire follow the portal (Danish). Assignment summaries
//! and details keep the JSON they were parsed from and serialize back to it
//! unchanged, so the metadata files mirror the API.

pub mod assignment;
pub mod school;

pub use assignment::{AssignmentDetail, AssignmentSummary, Attachment, DownloadedFile, Submission};
pub use school::School;
