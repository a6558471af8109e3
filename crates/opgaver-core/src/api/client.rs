//! API client for the Lectio JSON gateway.
//!
//! `PortalClient` is what the rest of the crate talks to. `LectioClient` is the
//! HTTP implementation: it logs in with a form post, keeps the session cookies
//! in reqwest's cookie jar, and adds the bearer token when the gateway issues
//! one.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::auth::{Credentials, Session};
use crate::models::{AssignmentDetail, AssignmentSummary, DownloadedFile, School};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default gateway base URL
pub const DEFAULT_BASE_URL: &str = "https://www.lectio.dk/api/v1/";

/// HTTP request timeout in seconds.
/// Attachments can be large scanned PDFs, so this is more generous than a
/// typical JSON call needs.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Operations the login loop and the download pipeline need from the portal.
#[async_trait]
pub trait PortalClient: Send + Sync {
    async fn list_schools(&self) -> Result<Vec<School>>;

    /// Log in. The returned session reports whether the portal accepted it.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;

    async fn list_assignments(&self, session: &Session) -> Result<Vec<AssignmentSummary>>;

    async fn assignment_detail(&self, session: &Session, id: &str) -> Result<AssignmentDetail>;

    /// Download the raw bytes behind an attachment URL
    async fn fetch(&self, session: &Session, url: &str) -> Result<DownloadedFile>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    authenticated: bool,
}

/// HTTP client for the Lectio gateway.
/// Clone is cheap - reqwest::Client uses Arc internally, so clones share the
/// connection pool and the cookie jar.
#[derive(Clone)]
pub struct LectioClient {
    client: Client,
    base_url: Url,
}

impl LectioClient {
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid gateway base URL: {}", base_url))?;

        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// URL of one of the gateway's own routes, always below the base path
    fn route(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid route: {}", path))
    }

    /// Resolve an attachment URL the way a browser would: absolute URLs are
    /// kept, `/x` is relative to the host, `x` to the base path.
    fn resolve(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url)
            .with_context(|| format!("Invalid URL: {}", url))
    }

    fn auth_headers(session: &Session) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = session.token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, session: Option<&Session>, path: &str) -> Result<T> {
        let url = self.route(path)?;
        let mut request = self.client.get(url.clone());
        if let Some(session) = session {
            request = request.headers(Self::auth_headers(session)?);
        }

        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }
}

#[async_trait]
impl PortalClient for LectioClient {
    async fn list_schools(&self) -> Result<Vec<School>> {
        let schools: Vec<School> = self.get(None, "schools").await?;
        debug!(count = schools.len(), "Schools fetched");
        Ok(schools)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.route(&format!("schools/{}/login", credentials.school_id))?;

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send authentication request")?;

        let response = Self::check_response(response).await?;

        let login: LoginResponse = response
            .json()
            .await
            .context("Failed to parse auth response")?;

        Ok(Session::new(
            credentials.username.clone(),
            credentials.school_id.clone(),
            login.token,
            login.authenticated,
        ))
    }

    async fn list_assignments(&self, session: &Session) -> Result<Vec<AssignmentSummary>> {
        let path = format!("schools/{}/assignments", session.school_id());
        self.get(Some(session), &path).await
    }

    async fn assignment_detail(&self, session: &Session, id: &str) -> Result<AssignmentDetail> {
        let path = format!("schools/{}/assignments/{}", session.school_id(), id);
        self.get(Some(session), &path).await
    }

    async fn fetch(&self, session: &Session, url: &str) -> Result<DownloadedFile> {
        let url = self.resolve(url)?;

        let response = self
            .client
            .get(url.clone())
            .headers(Self::auth_headers(session)?)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to download {}", url))?;

        let response = Self::check_response(response).await?;
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        debug!(%url, size = bytes.len(), "Attachment downloaded");
        Ok(DownloadedFile {
            bytes: bytes.to_vec(),
            headers,
        })
    }
}
