//! Portal API access.
//!
//! `PortalClient` is the narrow interface the login loop and the download
//! pipeline depend on. `LectioClient` implements it over HTTP against the
//! portal's JSON gateway, keeping the login cookies in its own jar.

pub mod client;
pub mod error;

pub use client::{LectioClient, PortalClient};
pub use error::ApiError;
