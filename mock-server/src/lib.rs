//! In-memory replica of the job-orchestration API surface the client
//! consumes: versioned collection endpoints with trailing slashes, listings
//! wrapped in `{"results": [...]}`, serial numeric ids, and a root endpoint
//! that answers 200 only to authenticated probes.
//!
//! Collections are created on first use, so the same server backs
//! `job_templates`, `inventories`, `projects`, or anything else a test
//! needs. Records are stored in id order, which keeps duplicate-name
//! lookups deterministic.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Backing store: one id-ordered map per collection plus the id counter.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    collections: HashMap<String, BTreeMap<u64, Value>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(root))
        .route("/api/v2/{collection}/", get(list).post(create))
        .route(
            "/api/v2/{collection}/{id}/",
            get(get_one).patch(update).delete(delete_one),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Authentication probe target: any `Authorization` header passes.
async fn root(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if headers.contains_key(header::AUTHORIZATION) {
        Ok(Json(json!({})))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn list(State(db): State<Db>, Path(collection): Path<String>) -> Json<Value> {
    let store = db.read().await;
    let records: Vec<Value> = store
        .collections
        .get(&collection)
        .map(|records| records.values().cloned().collect())
        .unwrap_or_default();
    Json(json!({ "results": records }))
}

async fn create(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Json(input): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let Value::Object(mut record) = input else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    record.insert("id".to_string(), json!(id));

    let record = Value::Object(record);
    store
        .collections
        .entry(collection)
        .or_default()
        .insert(id, record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_one(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, u64)>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    store
        .collections
        .get(&collection)
        .and_then(|records| records.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, u64)>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let Value::Object(changes) = input else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let mut store = db.write().await;
    let record = store
        .collections
        .get_mut(&collection)
        .and_then(|records| records.get_mut(&id))
        .ok_or(StatusCode::NOT_FOUND)?;

    if let Value::Object(fields) = record {
        apply_changes(fields, changes);
        fields.insert("id".to_string(), json!(id));
    }
    Ok(Json(record.clone()))
}

async fn delete_one(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, u64)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .collections
        .get_mut(&collection)
        .and_then(|records| records.remove(&id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn apply_changes(fields: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        fields.insert(key, value);
    }
}
