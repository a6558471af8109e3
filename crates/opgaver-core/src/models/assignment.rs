use std::borrow::Cow;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the assignment listing.
///
/// Serializes back to exactly the JSON the gateway sent, field order included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AssignmentSummary {
    id: Value,
    pub title: String,
    raw: Value,
}

#[derive(Deserialize)]
struct SummaryFields {
    id: Value,
    #[serde(rename = "opgavetitel")]
    title: String,
}

impl AssignmentSummary {
    /// The id as text, for routes and log fields.
    /// The gateway sends ids as strings, older exports as numbers.
    pub fn id(&self) -> Cow<'_, str> {
        match &self.id {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl TryFrom<Value> for AssignmentSummary {
    type Error = serde_json::Error;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let fields = SummaryFields::deserialize(&raw)?;
        if !(fields.id.is_string() || fields.id.is_number()) {
            return Err(serde::de::Error::custom(format!(
                "assignment id must be a string or a number, got {}",
                fields.id
            )));
        }
        Ok(Self {
            id: fields.id,
            title: fields.title,
            raw,
        })
    }
}

impl From<AssignmentSummary> for Value {
    fn from(summary: AssignmentSummary) -> Self {
        summary.raw
    }
}

/// A file reference inside an assignment detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(rename = "navn")]
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    #[serde(rename = "dokument", default)]
    pub document: Option<Attachment>,
}

#[derive(Deserialize)]
struct DetailFields {
    #[serde(rename = "opgavebeskrivelse", default)]
    description: Option<Attachment>,
    #[serde(rename = "indlæg", default)]
    submissions: Option<Vec<Submission>>,
}

/// Assignment detail, keeping the gateway's JSON for `detailed_metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AssignmentDetail {
    pub description: Option<Attachment>,
    pub submissions: Vec<Submission>,
    raw: Value,
}

impl AssignmentDetail {
    /// Submission documents in submission order, skipping entries without one
    pub fn documents(&self) -> impl Iterator<Item = &Attachment> {
        self.submissions.iter().filter_map(|s| s.document.as_ref())
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl TryFrom<Value> for AssignmentDetail {
    type Error = serde_json::Error;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let fields = DetailFields::deserialize(&raw)?;
        Ok(Self {
            description: fields.description,
            submissions: fields.submissions.unwrap_or_default(),
            raw,
        })
    }
}

impl From<AssignmentDetail> for Value {
    fn from(detail: AssignmentDetail) -> Self {
        detail.raw
    }
}

/// Result of fetching an attachment URL.
#[derive(Debug, Clone, Default)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    pub headers: HeaderMap,
}

impl DownloadedFile {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            headers: HeaderMap::new(),
        }
    }
}
