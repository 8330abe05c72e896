//! Name-addressed CRUD adapter over one remote collection.
//!
//! # Design
//! The remote API addresses resources by server-assigned id; callers address
//! them by name. The adapter bridges the two with a linear scan over the
//! collection listing (`{"results": [{"id": .., "name": ..}, ..]}`) — no
//! caching, first exact match wins. Listings are assumed small and
//! unpaginated; behavior against a paginated backend is undefined.
//!
//! Reference fields in outgoing payloads (`inventory`, `project`,
//! `webhook_credential`, `organization`) also hold names. Before a POST or
//! PATCH each one present as a string is resolved by spinning up an adapter
//! over the referenced collection and running the same scan; values that are
//! already ids (non-strings) pass through untouched.
//!
//! The payload type parameter is the bound schema: `create`/`update` only
//! exist where `M: Serialize`, so "no schema bound to this adapter" is a
//! compile error rather than a runtime one.

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::Http;
use crate::models::{JobTemplate, WorkflowJobTemplate};

/// Reference field to collection path, fixed by the remote schema.
const REFERENCE_COLLECTIONS: [(&str, &str); 4] = [
    ("inventory", "inventories"),
    ("project", "projects"),
    ("webhook_credential", "webhook_credentials"),
    ("organization", "organizations"),
];

/// Name-addressed CRUD façade over one collection, borrowing the client's
/// session. `M` is the payload schema accepted by `create`/`update`.
pub struct Adapter<'a, M> {
    http: &'a Http,
    collection: &'static str,
    payload: PhantomData<fn(&M)>,
}

/// Adapter over the job-template collection.
pub type JobTemplates<'a> = Adapter<'a, JobTemplate>;

/// Adapter over the workflow-job-template collection.
pub type WorkflowJobTemplates<'a> = Adapter<'a, WorkflowJobTemplate>;

/// Adapter bound to no payload schema; used for reference-name lookups.
type Lookup<'a> = Adapter<'a, ()>;

impl<'a, M> Adapter<'a, M> {
    pub(crate) fn new(http: &'a Http, collection: &'static str) -> Self {
        Self {
            http,
            collection,
            payload: PhantomData,
        }
    }

    /// Scan the collection listing for the first entry with this exact name.
    fn id_by_name(&self, name: &str) -> Result<Value, ApiError> {
        let listing = self.http.get(self.collection, None)?;
        let results = listing
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ApiError::Deserialization(format!(
                    "listing of '{}' has no 'results' array",
                    self.collection
                ))
            })?;

        for entry in results {
            if entry.get("name").and_then(Value::as_str) == Some(name) {
                return entry.get("id").cloned().ok_or_else(|| {
                    ApiError::Deserialization(format!(
                        "listing entry for '{name}' in '{}' has no id",
                        self.collection
                    ))
                });
            }
        }
        Err(ApiError::NotFound(name.to_string()))
    }

    /// Rewrite reference-field names to server ids in an outgoing payload.
    fn resolve_references(&self, mut data: Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
        for (field, collection) in REFERENCE_COLLECTIONS {
            let Some(Value::String(name)) = data.get(field) else {
                continue;
            };
            let name = name.clone();
            let id = Lookup::new(self.http, collection).id_by_name(&name)?;
            data.insert(field.to_string(), id);
        }
        Ok(data)
    }

    /// Fetch the full record of the resource with this name.
    pub fn fetch(&self, name: &str) -> Result<Value, ApiError> {
        let id = self.id_by_name(name)?;
        self.http.get(self.collection, Some(&id_segment(&id)))
    }

    /// Whether a resource with this name exists.
    ///
    /// A missing name answers `false`; transport and server failures still
    /// propagate as errors.
    pub fn exists(&self, name: &str) -> Result<bool, ApiError> {
        match self.id_by_name(name) {
            Ok(_) => Ok(true),
            Err(ApiError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Delete the resource with this name.
    pub fn delete(&self, name: &str) -> Result<(), ApiError> {
        let id = self.id_by_name(name)?;
        self.http.delete(self.collection, &id_segment(&id))
    }
}

impl<'a, M: Serialize> Adapter<'a, M> {
    /// Create a resource from a validated model.
    pub fn create(&self, payload: &M) -> Result<Value, ApiError> {
        let data = self.resolve_references(to_object(payload)?)?;
        self.http.post(self.collection, &data)
    }

    /// Update the resource with this name from a validated model.
    pub fn update(&self, name: &str, payload: &M) -> Result<Value, ApiError> {
        let id = self.id_by_name(name)?;
        let data = self.resolve_references(to_object(payload)?)?;
        self.http.patch(self.collection, &id_segment(&id), &data)
    }
}

/// Serialize a model into the JSON object the wire expects.
fn to_object<M: Serialize>(payload: &M) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Serialization(format!(
            "expected a JSON object payload, got {other}"
        ))),
    }
}

/// Render an id as a URL path segment. The API serves ids as JSON numbers;
/// string ids are accepted as-is for forward compatibility.
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BearerAuth;
    use serde_json::json;

    // Pointing at a closed port: any accidental network hit in these tests
    // fails loudly as a transport error.
    fn http() -> Http {
        Http::new("http://127.0.0.1:1", "v2", &BearerAuth::new("t"), true)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn id_segment_accepts_string_and_numeric_ids() {
        assert_eq!(id_segment(&json!("123")), "123");
        assert_eq!(id_segment(&json!(123)), "123");
    }

    #[test]
    fn numeric_reference_values_pass_through_unresolved() {
        let http = http();
        let adapter = Lookup::new(&http, "job_templates");
        let data = object(json!({"name": "jt", "inventory": 5, "project": 7}));
        let resolved = adapter.resolve_references(data).unwrap();
        assert_eq!(resolved["inventory"], json!(5));
        assert_eq!(resolved["project"], json!(7));
    }

    #[test]
    fn null_and_missing_reference_fields_are_left_alone() {
        let http = http();
        let adapter = Lookup::new(&http, "workflow_job_templates");
        let data = object(json!({"name": "wf", "organization": null}));
        let resolved = adapter.resolve_references(data).unwrap();
        assert_eq!(resolved["organization"], Value::Null);
        assert!(!resolved.contains_key("inventory"));
    }

    #[test]
    fn string_reference_values_trigger_a_lookup() {
        let http = http();
        let adapter = Lookup::new(&http, "job_templates");
        let data = object(json!({"name": "jt", "inventory": "db_inventory"}));
        // The lookup goes over the wire; against a closed port it must
        // surface as a transport error, proving a resolution was attempted.
        let err = adapter.resolve_references(data).unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        let err = to_object(&42).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }
}
