//! Authentication module for collecting credentials and logging in.
//!
//! This module provides:
//! - `Credentials`: one login attempt's username, password and school
//! - `Session`: the authenticated context returned by the portal client
//! - `authenticate`: the retry loop driven by an injected `CredentialSource`
//!
//! Nothing here touches the disk. Credentials live only for one attempt.

pub mod credentials;
pub mod login;
pub mod session;

pub use credentials::Credentials;
pub use login::{authenticate, CredentialSource, LoginOutcome};
pub use session::Session;
