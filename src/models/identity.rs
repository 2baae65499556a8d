//! Identity types bridging the session to the hosted service.

/// The logged-in identity carried by the session cookie.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Service user id (also the profile row's primary key)
    pub user_id: String,
    /// Bearer token evaluated under the user's access policy
    pub access_token: String,
    /// Renewal credential (carried, no refresh flow in scope)
    pub refresh_token: String,
}

/// Tokens and identity returned by the auth service on sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthSession {
    /// The identity this session authenticates.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Result of a sign-up call.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The service opened a session right away.
    SignedIn(AuthSession),
    /// The account exists but the user must confirm their email before
    /// signing in.
    ConfirmationRequired,
}
