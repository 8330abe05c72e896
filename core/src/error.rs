//! Error types for the AWX API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "no resource carries this name" from "the server misbehaved." Status and
//! transport failures are kept apart: `Status` means the server answered with
//! a non-2xx code, `Transport` means the request never completed. Both carry
//! the CRUD action that was in flight so the message reads as
//! "failed to create resource: ...".

use thiserror::Error;

/// The CRUD action a request was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Retrieve,
    Create,
    Update,
    Delete,
}

impl Action {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Action::Retrieve => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the client, the HTTP wrapper, and the adapters.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Neither a token nor a full username/password pair was supplied.
    #[error("authentication failed: either a token or both username and password must be provided")]
    MissingCredentials,

    /// A name lookup over a collection listing yielded zero exact matches.
    #[error("resource with name '{0}' not found")]
    NotFound(String),

    /// The server answered with a non-2xx status code.
    #[error("failed to {action} resource: HTTP {status}: {body}")]
    Status {
        action: Action,
        status: u16,
        body: String,
    },

    /// The request never completed (connect failure, I/O error, bad URL).
    #[error("failed to {action} resource: {message}")]
    Transport { action: Action, message: String },

    /// A model field violated its schema bounds at build time.
    #[error("invalid value for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The outgoing payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
