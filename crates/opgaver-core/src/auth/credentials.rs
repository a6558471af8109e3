use std::fmt;

/// Username, password and school for a single login attempt.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub school_id: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        school_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            school_id: school_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("school_id", &self.school_id)
            .finish()
    }
}
