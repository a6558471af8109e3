//! Core library for opgaver.
//!
//! Authenticates against the Lectio portal and downloads every assignment
//! (opgave) with its metadata and attachments into a local directory tree.
//!
//! - `api`: the `PortalClient` seam and the HTTP `LectioClient`
//! - `auth`: credentials, sessions and the credential-retry login loop
//! - `download`: the sequential download pipeline and its failure policy
//! - `fs`: directory and file materialization
//! - `progress`: the progress reporting seam
//! - `config`: persisted prompt defaults and gateway settings

pub mod api;
pub mod auth;
pub mod config;
pub mod download;
pub mod fs;
pub mod models;
pub mod progress;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiError, LectioClient, PortalClient};
pub use auth::{authenticate, CredentialSource, Credentials, LoginOutcome, Session};
pub use config::Config;
pub use download::{DownloadReport, Downloader, FailureKind, FailurePolicy, ROOT_DIR};
pub use progress::{NoProgress, ProgressReporter};
