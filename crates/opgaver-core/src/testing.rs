//! In-memory fakes for the login loop and download pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ApiError, PortalClient};
use crate::auth::{CredentialSource, Credentials, Session};
use crate::models::{AssignmentDetail, AssignmentSummary, DownloadedFile, School};
use crate::progress::ProgressReporter;

pub(crate) fn summary(id: &str, title: &str) -> AssignmentSummary {
    AssignmentSummary::try_from(json!({"id": id, "opgavetitel": title})).expect("valid summary")
}

/// Build a detail from an optional description `(url, filename)` and a list of
/// submission documents.
pub(crate) fn detail(description: Option<(&str, &str)>, documents: &[(&str, &str)]) -> AssignmentDetail {
    let attachment = |(url, filename): (&str, &str)| json!({"url": url, "navn": filename});

    let mut raw = json!({
        "indlæg": documents
            .iter()
            .map(|doc| json!({"dokument": attachment(*doc)}))
            .collect::<Vec<Value>>(),
    });
    if let Some(description) = description {
        raw["opgavebeskrivelse"] = attachment(description);
    }
    AssignmentDetail::try_from(raw).expect("valid detail")
}

#[derive(Default)]
pub(crate) struct FakePortal {
    schools: Vec<School>,
    password: Option<String>,
    unauthenticated: bool,
    fail_schools: bool,
    fail_listing: bool,
    assignments: Vec<AssignmentSummary>,
    details: HashMap<String, AssignmentDetail>,
    files: HashMap<String, Vec<u8>>,
    login_attempts: AtomicUsize,
    school_listings: AtomicUsize,
    assignment_listings: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl FakePortal {
    pub(crate) fn new() -> Self {
        Self {
            schools: vec![School {
                id: "243".to_string(),
                name: "Aarhus Katedralskole".to_string(),
            }],
            ..Default::default()
        }
    }

    pub(crate) fn accept_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Accept the password but hand back a session that is not logged in
    pub(crate) fn report_unauthenticated(mut self) -> Self {
        self.unauthenticated = true;
        self
    }

    pub(crate) fn fail_school_listing(mut self) -> Self {
        self.fail_schools = true;
        self
    }

    pub(crate) fn fail_assignment_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub(crate) fn with_assignment(mut self, summary: AssignmentSummary, detail: AssignmentDetail) -> Self {
        self.details.insert(summary.id().into_owned(), detail);
        self.assignments.push(summary);
        self
    }

    /// List an assignment whose detail call fails
    pub(crate) fn with_listed_only(mut self, summary: AssignmentSummary) -> Self {
        self.assignments.push(summary);
        self
    }

    /// Make `url` downloadable. Every other URL fails to fetch.
    pub(crate) fn with_file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub(crate) fn login_attempts(&self) -> usize {
        self.login_attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn school_listings(&self) -> usize {
        self.school_listings.load(Ordering::SeqCst)
    }

    pub(crate) fn assignment_listings(&self) -> usize {
        self.assignment_listings.load(Ordering::SeqCst)
    }

    pub(crate) fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched lock").clone()
    }
}

#[async_trait]
impl PortalClient for FakePortal {
    async fn list_schools(&self) -> Result<Vec<School>> {
        self.school_listings.fetch_add(1, Ordering::SeqCst);
        if self.fail_schools {
            return Err(ApiError::ServerError("school list unavailable".to_string()).into());
        }
        Ok(self.schools.clone())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        self.login_attempts.fetch_add(1, Ordering::SeqCst);
        if self.password.as_deref() != Some(credentials.password.as_str()) {
            return Err(ApiError::Unauthorized.into());
        }
        Ok(Session::new(
            credentials.username.clone(),
            credentials.school_id.clone(),
            Some("token".to_string()),
            !self.unauthenticated,
        ))
    }

    async fn list_assignments(&self, _session: &Session) -> Result<Vec<AssignmentSummary>> {
        self.assignment_listings.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(ApiError::ServerError("listing unavailable".to_string()).into());
        }
        Ok(self.assignments.clone())
    }

    async fn assignment_detail(&self, _session: &Session, id: &str) -> Result<AssignmentDetail> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("assignment {}", id)).into())
    }

    async fn fetch(&self, _session: &Session, url: &str) -> Result<DownloadedFile> {
        self.fetched.lock().expect("fetched lock").push(url.to_string());
        self.files
            .get(url)
            .map(|bytes| DownloadedFile::new(bytes.clone()))
            .ok_or_else(|| anyhow!("connection reset while fetching {}", url))
    }
}

/// Credential source that answers from fixed scripts.
///
/// Always picks the first school. Runs out of passwords with an error, and
/// answers "no" once the retry answers are used up.
pub(crate) struct ScriptedCredentials {
    passwords: VecDeque<String>,
    answers: VecDeque<bool>,
    pub(crate) prompts: usize,
    pub(crate) retry_questions: usize,
    pub(crate) errors: Vec<String>,
}

impl ScriptedCredentials {
    pub(crate) fn new(passwords: Vec<&str>, answers: Vec<bool>) -> Self {
        Self {
            passwords: passwords.into_iter().map(str::to_string).collect(),
            answers: answers.into(),
            prompts: 0,
            retry_questions: 0,
            errors: Vec::new(),
        }
    }
}

impl CredentialSource for ScriptedCredentials {
    fn credentials(&mut self, schools: &[School]) -> Result<Credentials> {
        self.prompts += 1;
        let school = schools.first().ok_or_else(|| anyhow!("no schools to pick from"))?;
        let password = self
            .passwords
            .pop_front()
            .ok_or_else(|| anyhow!("no more scripted passwords"))?;
        Ok(Credentials::new("elev01", password, school.id.clone()))
    }

    fn retry(&mut self, error: &anyhow::Error) -> Result<bool> {
        self.retry_questions += 1;
        self.errors.push(format!("{:#}", error));
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProgressEvent {
    Start(u64),
    Increment,
    Stop,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Vec<ProgressEvent>,
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, total: u64) {
        self.events.push(ProgressEvent::Start(total));
    }

    fn increment(&mut self) {
        self.events.push(ProgressEvent::Increment);
    }

    fn stop(&mut self) {
        self.events.push(ProgressEvent::Stop);
    }
}
