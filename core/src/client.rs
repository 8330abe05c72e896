//! Composition root wiring authentication, the HTTP session, and the
//! per-resource adapters.

use crate::auth::{BasicAuth, BearerAuth};
use crate::error::ApiError;
use crate::http::Http;
use crate::resources::{Adapter, JobTemplates, WorkflowJobTemplates};

/// Version path segment of the API this client speaks.
const API_VERSION: &str = "v2";

/// Client for the job-orchestration API.
///
/// Holds one authenticated session shared by every adapter it hands out.
/// The session is never mutated after construction; no thread-safety
/// guarantee is made for concurrent use of a single client.
///
/// ```no_run
/// use awx_core::Client;
///
/// let client = Client::builder("https://awx.example.com")
///     .token("api_token")
///     .build()?;
/// let record = client.job_templates().fetch("Backup Job")?;
/// # Ok::<(), awx_core::ApiError>(())
/// ```
#[derive(Debug)]
pub struct Client {
    http: Http,
}

impl Client {
    /// Start configuring a client for the API at `url`.
    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            url: url.into(),
            username: None,
            password: None,
            token: None,
            verify_tls: true,
        }
    }

    /// Adapter over the job-template collection.
    pub fn job_templates(&self) -> JobTemplates<'_> {
        Adapter::new(&self.http, "job_templates")
    }

    /// Adapter over the workflow-job-template collection.
    pub fn workflow_job_templates(&self) -> WorkflowJobTemplates<'_> {
        Adapter::new(&self.http, "workflow_job_templates")
    }

    /// Probe the server with the session credentials.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        self.http.is_authenticated()
    }
}

/// Builder for [`Client`].
///
/// Credential selection at [`build`]: a token wins over a username/password
/// pair; supplying neither (or an incomplete pair) is a configuration error
/// raised before any network activity.
///
/// [`build`]: ClientBuilder::build
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    verify_tls: bool,
}

impl ClientBuilder {
    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn token(mut self, value: impl Into<String>) -> Self {
        self.token = Some(value.into());
        self
    }

    /// Toggle TLS certificate verification. Disabling it exposes the session
    /// to interception; keep it on outside of test environments.
    pub fn verify_tls(mut self, value: bool) -> Self {
        self.verify_tls = value;
        self
    }

    pub fn build(self) -> Result<Client, ApiError> {
        let http = if let Some(token) = self.token {
            Http::new(
                &self.url,
                API_VERSION,
                &BearerAuth::new(token),
                self.verify_tls,
            )
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            Http::new(
                &self.url,
                API_VERSION,
                &BasicAuth::new(username, password),
                self.verify_tls,
            )
        } else {
            return Err(ApiError::MissingCredentials);
        };
        Ok(Client { http })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_sufficient() {
        assert!(Client::builder("https://api.example.com")
            .token("t")
            .build()
            .is_ok());
    }

    #[test]
    fn username_and_password_are_sufficient() {
        assert!(Client::builder("https://api.example.com")
            .username("user")
            .password("password")
            .build()
            .is_ok());
    }

    #[test]
    fn token_wins_over_credential_pair() {
        // Both supplied: construction succeeds and must not require the
        // pair to be complete.
        assert!(Client::builder("https://api.example.com")
            .token("t")
            .username("user")
            .build()
            .is_ok());
    }

    #[test]
    fn missing_credentials_fail_before_any_network_call() {
        let err = Client::builder("https://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingCredentials));
    }

    #[test]
    fn incomplete_credential_pair_fails() {
        let err = Client::builder("https://api.example.com")
            .username("user")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingCredentials));
    }
}
