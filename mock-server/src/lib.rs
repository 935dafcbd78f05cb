use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, delete, get, patch, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

/// Query string as `{key: [values...]}`, keeping repeated keys.
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// Everything `/api/echo` saw about a request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: QueryValues,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/get", get(query_handler))
        .route("/api/post-form", post(form_handler))
        .route("/api/post-json", post(json_handler))
        .route("/api/put-json", put(json_handler))
        .route("/api/patch-json", patch(json_handler))
        .route("/api/delete-json", delete(json_handler))
        .route("/api/bytes", get(bytes_handler))
        .route("/api/echo", any(echo_handler))
        .route("/api/status/{code}", any(status_handler))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    tracing::info!(addr = ?listener.local_addr().ok(), "mock server listening");
    axum::serve(listener, app()).await
}

fn group(pairs: Vec<(String, String)>) -> QueryValues {
    let mut grouped = QueryValues::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

async fn query_handler(Query(pairs): Query<Vec<(String, String)>>) -> Json<QueryValues> {
    Json(group(pairs))
}

async fn form_handler(Form(fields): Form<BTreeMap<String, String>>) -> Json<BTreeMap<String, String>> {
    Json(fields)
}

async fn json_handler(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn echo_handler(
    method: Method,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    Json(Echo {
        method: method.to_string(),
        query: group(pairs),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// A fixed body that is not valid UTF-8 (`café` in Latin-1).
async fn bytes_handler() -> ([(header::HeaderName, &'static str); 1], &'static [u8]) {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        &b"caf\xe9"[..],
    )
}

async fn status_handler(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}
