//! Authentication strategies for configuring a session's credentials.
//!
//! # Design
//! A strategy is applied exactly once, when the HTTP wrapper is constructed,
//! by writing into the session-wide header set that accompanies every
//! request. Credentials are immutable after construction. The two built-in
//! strategies cover the remote API's supported schemes: username/password
//! (Basic) and an OAuth2 bearer token.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Session-wide headers attached to every request the wrapper issues.
pub type SessionHeaders = Vec<(String, String)>;

/// A strategy for attaching credentials to an HTTP session.
pub trait Auth {
    /// Write this strategy's credentials into the session header set.
    fn apply(&self, headers: &mut SessionHeaders);
}

/// Username/password authentication via the `Basic` scheme.
///
/// Credentials travel base64-encoded in the request header, so this is only
/// safe over HTTPS.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Auth for BasicAuth {
    fn apply(&self, headers: &mut SessionHeaders) {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        headers.push(("Authorization".to_string(), format!("Basic {encoded}")));
    }
}

/// OAuth2 bearer-token authentication.
///
/// The token is sent as-is; rotation and expiry are the caller's concern.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Auth for BearerAuth {
    fn apply(&self, headers: &mut SessionHeaders) {
        headers.push(("Authorization".to_string(), format!("Bearer {}", self.token)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_sets_encoded_authorization_header() {
        let mut headers = SessionHeaders::new();
        BasicAuth::new("user", "password").apply(&mut headers);
        // base64("user:password")
        assert_eq!(
            headers,
            vec![(
                "Authorization".to_string(),
                "Basic dXNlcjpwYXNzd29yZA==".to_string()
            )]
        );
    }

    #[test]
    fn bearer_auth_sets_bearer_authorization_header() {
        let mut headers = SessionHeaders::new();
        BearerAuth::new("token").apply(&mut headers);
        assert_eq!(
            headers,
            vec![("Authorization".to_string(), "Bearer token".to_string())]
        );
    }

    #[test]
    fn apply_appends_without_clearing_existing_headers() {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        BearerAuth::new("t").apply(&mut headers);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].0, "Accept");
    }
}
