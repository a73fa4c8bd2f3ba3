//! Request-scoped session carrying the music provider credential
//!
//! A `Session` is built by the HTTP boundary for each request and handed to
//! the mood pipeline explicitly. Nothing here is cached between requests.

/// Credential-bearing session for one pipeline invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session with a provider token
    ///
    /// Empty or whitespace-only tokens are stored as absent.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            Self::anonymous()
        } else {
            Self {
                token: Some(token.to_string()),
            }
        }
    }

    /// Session with no provider token
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Bearer token, if present
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
