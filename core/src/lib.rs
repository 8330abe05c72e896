//! Typed, synchronous client for an AWX-style job-orchestration REST API.
//!
//! # Overview
//! The library exposes name-addressed CRUD over the API's id-addressed
//! resources. A [`Client`] holds one authenticated blocking HTTP session and
//! hands out an [`Adapter`] per resource kind; payloads are built from typed,
//! bound-checked models and reference names are rewritten to server ids
//! right before transmission.
//!
//! # Design
//! - One session per client, applied once at construction by an [`auth`]
//!   strategy (Basic credentials or a bearer token).
//! - All I/O is blocking and single-shot: no retries, no caching, no
//!   pagination handling.
//! - Errors surface synchronously as [`ApiError`]; only
//!   [`Client::is_authenticated`] converts a status failure into a boolean.

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod models;
pub mod resources;

pub use auth::{Auth, BasicAuth, BearerAuth};
pub use client::{Client, ClientBuilder};
pub use error::{Action, ApiError};
pub use http::Http;
pub use models::{
    JobTemplate, JobTemplateBuilder, JobType, WebhookService, WorkflowJobTemplate,
    WorkflowJobTemplateBuilder,
};
pub use resources::{Adapter, JobTemplates, WorkflowJobTemplates};
