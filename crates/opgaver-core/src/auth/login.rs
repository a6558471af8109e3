use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::{ApiError, PortalClient};
use crate::download::FailureKind;
use crate::models::School;

use super::{Credentials, Session};

/// Where the login loop gets its input from.
///
/// Both calls are synchronous and happen at fixed points: `credentials` once
/// per attempt, `retry` once after each failed attempt.
pub trait CredentialSource {
    /// Collect username, password and a school picked from `schools`
    fn credentials(&mut self, schools: &[School]) -> Result<Credentials>;

    /// Show the login error and ask whether to try again
    fn retry(&mut self, error: &anyhow::Error) -> Result<bool>;
}

#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// The user declined to retry after a failed login
    Abandoned,
}

/// Prompt for credentials and log in until it succeeds or the user gives up.
///
/// Every login error is handled the same way: shown through
/// `CredentialSource::retry`, then retried or abandoned. A failure to list
/// schools or to read input is returned as an error.
pub async fn authenticate<C, S>(client: &C, source: &mut S) -> Result<LoginOutcome>
where
    C: PortalClient + ?Sized,
    S: CredentialSource + ?Sized,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let schools = client
            .list_schools()
            .await
            .with_context(|| format!("Failed to {}", FailureKind::ListSchools))?;
        debug!(count = schools.len(), "Fetched school list");

        let credentials = source.credentials(&schools)?;
        debug!(
            attempt,
            username = %credentials.username,
            school_id = %credentials.school_id,
            "Attempting login"
        );

        match try_login(client, credentials).await {
            Ok(session) => {
                info!(
                    attempt,
                    username = session.username(),
                    at = %session.authenticated_at(),
                    "Login successful"
                );
                return Ok(LoginOutcome::Authenticated(session));
            }
            Err(e) => {
                // Shown to the user by `retry`
                debug!(attempt, error = %e, "Login failed");
                if !source.retry(&e)? {
                    info!(attempt, "Login abandoned");
                    return Ok(LoginOutcome::Abandoned);
                }
            }
        }
    }
}

async fn try_login<C>(client: &C, credentials: Credentials) -> Result<Session>
where
    C: PortalClient + ?Sized,
{
    let session = client.authenticate(&credentials).await?;
    if !session.is_authenticated() {
        return Err(ApiError::NotAuthenticated {
            username: credentials.username,
            school_id: credentials.school_id,
        }
        .into());
    }
    Ok(session)
}
