//! Authentication state handed to the profile screen.

use profile_api::AccessToken;

/// Snapshot of the signed-in user's credentials.
///
/// Passed explicitly into the controller and page rather than read from a
/// global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub is_authenticated: bool,
    pub access_token: Option<AccessToken>,
}

impl AuthSession {
    /// A signed-in session carrying a bearer token.
    pub fn authenticated(token: AccessToken) -> Self {
        Self {
            is_authenticated: true,
            access_token: Some(token),
        }
    }

    /// No user signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }
}
