//! Blocking HTTP wrapper over the versioned REST API.
//!
//! # Design
//! `Http` owns one authenticated ureq [`Agent`] (the session) for its whole
//! lifetime. The agent is configured with `http_status_as_error(false)` so
//! non-2xx responses come back as data and status interpretation stays here,
//! in one place. Resource verbs build `{base}/api/{version}/{resource}/`
//! URLs, issue a single blocking request, and unwrap the JSON body; there are
//! no retries and no caching. Each verb tags its failures with the CRUD
//! action so errors read "failed to create resource: ...".

use serde_json::{Map, Value};
use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::auth::{Auth, SessionHeaders};
use crate::error::{Action, ApiError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Outcome of a single request before it is tagged with a CRUD action.
enum RequestError {
    Status { status: u16, body: String },
    Transport(String),
    Serialization(String),
    Deserialization(String),
}

impl RequestError {
    fn tag(self, action: Action) -> ApiError {
        match self {
            RequestError::Status { status, body } => ApiError::Status {
                action,
                status,
                body,
            },
            RequestError::Transport(message) => ApiError::Transport { action, message },
            RequestError::Serialization(msg) => ApiError::Serialization(msg),
            RequestError::Deserialization(msg) => ApiError::Deserialization(msg),
        }
    }
}

/// Synchronous HTTP client for the versioned API.
///
/// Holds the base URL, the API version path segment, the session agent, and
/// the session-wide headers produced by [`Auth::apply`] at construction time.
#[derive(Debug, Clone)]
pub struct Http {
    base_url: String,
    api_version: String,
    agent: Agent,
    headers: SessionHeaders,
}

impl Http {
    /// Build an authenticated session.
    ///
    /// `verify_tls: false` disables certificate verification on the agent;
    /// use only against test or lab endpoints.
    pub fn new(url: &str, api_version: &str, auth: &dyn Auth, verify_tls: bool) -> Self {
        let mut config = Agent::config_builder().http_status_as_error(false);
        if !verify_tls {
            config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
        }
        let agent = config.build().new_agent();

        let mut headers = SessionHeaders::new();
        auth.apply(&mut headers);

        Self {
            base_url: url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            agent,
            headers,
        }
    }

    /// `{base}/api/{version}/{resource}/`, with `/{id}/` appended when given.
    fn build_url(&self, resource: &str, id: Option<&str>) -> String {
        let url = format!("{}/api/{}/{}/", self.base_url, self.api_version, resource);
        match id {
            Some(id) => format!("{url}{id}/"),
            None => url,
        }
    }

    /// Issue one request and unwrap the JSON body.
    ///
    /// Empty bodies map to an empty JSON object rather than a parse error,
    /// since the API answers 204 with no content on delete.
    fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Map<String, Value>>,
    ) -> Result<Value, RequestError> {
        log::debug!("{method} {url}");

        let result = match method {
            Method::Get | Method::Delete => {
                let mut req = match method {
                    Method::Get => self.agent.get(url),
                    _ => self.agent.delete(url),
                };
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            Method::Post | Method::Patch => {
                let empty = Map::new();
                let payload = serde_json::to_string(body.unwrap_or(&empty))
                    .map_err(|e| RequestError::Serialization(e.to_string()))?;
                let mut req = match method {
                    Method::Post => self.agent.post(url),
                    _ => self.agent.patch(url),
                };
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.content_type("application/json").send(payload.as_bytes())
            }
        };

        let mut response = result.map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string().unwrap_or_default();
        log::debug!("{method} {url} -> {status}");

        if !(200..300).contains(&status) {
            return Err(RequestError::Status { status, body: text });
        }
        if text.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| RequestError::Deserialization(e.to_string()))
    }

    /// Probe the bare base URL with the session credentials.
    ///
    /// A non-2xx answer means "not authenticated" rather than an error; only
    /// transport-level failures propagate.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        match self.request(Method::Get, &self.base_url, None) {
            Ok(_) => Ok(true),
            Err(RequestError::Status { .. }) => Ok(false),
            Err(e) => Err(e.tag(Action::Retrieve)),
        }
    }

    /// Retrieve a collection listing, or a single resource when `id` is given.
    pub fn get(&self, resource: &str, id: Option<&str>) -> Result<Value, ApiError> {
        let url = self.build_url(resource, id);
        self.request(Method::Get, &url, None)
            .map_err(|e| e.tag(Action::Retrieve))
    }

    /// Create a new resource from a JSON object payload.
    pub fn post(&self, resource: &str, data: &Map<String, Value>) -> Result<Value, ApiError> {
        let url = self.build_url(resource, None);
        self.request(Method::Post, &url, Some(data))
            .map_err(|e| e.tag(Action::Create))
    }

    /// Apply a partial update to an existing resource.
    pub fn patch(
        &self,
        resource: &str,
        id: &str,
        data: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        let url = self.build_url(resource, Some(id));
        self.request(Method::Patch, &url, Some(data))
            .map_err(|e| e.tag(Action::Update))
    }

    /// Delete a resource by id.
    pub fn delete(&self, resource: &str, id: &str) -> Result<(), ApiError> {
        let url = self.build_url(resource, Some(id));
        self.request(Method::Delete, &url, None)
            .map(|_| ())
            .map_err(|e| e.tag(Action::Delete))
    }
}
