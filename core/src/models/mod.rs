//! Typed schema models for the remote resource kinds.
//!
//! # Design
//! Models mirror the remote API's writable attributes field for field. They
//! are built through builders that fill in the API's defaults and check the
//! schema bounds once, at `build()`; after that a model is an inert payload
//! consumed by a single create or update call.
//!
//! Two fields serialize to non-obvious wire shapes: `extra_vars` is a free
//! JSON object sent as a JSON *string*, and `job_tags` is a set of strings
//! sent comma-joined. Reference fields (`inventory`, `project`,
//! `webhook_credential`, `organization`) hold human-readable names here; the
//! adapter rewrites them to server ids before transmission.

mod enums;
mod job_template;
mod workflow_job_template;

pub use enums::{JobType, WebhookService};
pub use job_template::{JobTemplate, JobTemplateBuilder};
pub use workflow_job_template::{WorkflowJobTemplate, WorkflowJobTemplateBuilder};

use std::collections::BTreeSet;

use serde::Serializer;
use serde_json::{Map, Value};

/// Generate builder setters for boolean schema flags.
macro_rules! flag_setters {
    ($($field:ident),+ $(,)?) => {
        $(
            pub fn $field(mut self, value: bool) -> Self {
                self.template.$field = value;
                self
            }
        )+
    };
}
pub(crate) use flag_setters;

/// Serialize a JSON object as its JSON text, matching the API's expectation
/// that `extra_vars` arrives as a string.
pub(crate) fn vars_as_json_text<S>(vars: &Map<String, Value>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = serde_json::to_string(vars).map_err(serde::ser::Error::custom)?;
    s.serialize_str(&text)
}

/// Serialize a tag set as a comma-joined string.
pub(crate) fn tags_as_comma_list<S>(tags: &BTreeSet<String>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let joined = tags.iter().map(String::as_str).collect::<Vec<_>>().join(",");
    s.serialize_str(&joined)
}
