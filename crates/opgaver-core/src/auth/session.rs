use chrono::{DateTime, Utc};

/// Authenticated context required by the listing and detail calls.
///
/// Only a `PortalClient` builds one. After login it is passed around by shared
/// reference and never changes.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    school_id: String,
    token: Option<String>,
    authenticated: bool,
    authenticated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        school_id: impl Into<String>,
        token: Option<String>,
        authenticated: bool,
    ) -> Self {
        Self {
            username: username.into(),
            school_id: school_id.into(),
            token,
            authenticated,
            authenticated_at: Utc::now(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn school_id(&self) -> &str {
        &self.school_id
    }

    /// Get the bearer token if the gateway issued one
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}
