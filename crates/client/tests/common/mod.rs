//! Fake management backend for integration tests.
//!
//! Every request is recorded and answered by a closure, so each test states
//! exactly what the backend returns.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::Value;

use qms_client::http::DEFAULT_TIMEOUT;
use qms_client::{HttpClient, ManagementApi, MemoryTokenStore, Navigator, Session};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn push(&self, r: Recorded) {
        self.0.lock().unwrap().push(r);
    }
}

/// Start a backend on `127.0.0.1:0` and return its API base URL.
pub async fn fake_backend<F>(responder: F) -> (String, Recorder)
where
    F: Fn(&Recorded) -> (StatusCode, Value) + Send + Sync + 'static,
{
    let recorder = Recorder::default();
    let responder = Arc::new(responder);
    let rec = recorder.clone();

    let app = Router::new().fallback(move |req: Request| {
        let rec = rec.clone();
        let responder = Arc::clone(&responder);
        async move {
            let (parts, body) = req.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();
            let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
                .map(|q| q.0)
                .unwrap_or_default();
            let recorded = Recorded {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query,
                authorization: parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            };
            let (status, json) = responder(&recorded);
            rec.push(recorded);
            (status, Json(json))
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), recorder)
}

pub fn session(token: Option<&str>) -> Arc<Session> {
    let store = match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    };
    Arc::new(Session::new(Arc::new(store), Arc::new(Navigator::new())))
}

pub fn api(base_url: &str, session: Arc<Session>) -> ManagementApi {
    let http = HttpClient::new(base_url, DEFAULT_TIMEOUT, session).unwrap();
    ManagementApi::new(Arc::new(http))
}

/// `{data, pagination}` for a list endpoint.
pub fn page_body(rows: Vec<Value>, total: u64, page_num: i64, page_size: i64) -> Value {
    serde_json::json!({
        "data": rows,
        "pagination": {"total": total, "pageNum": page_num, "pageSize": page_size},
    })
}

pub fn supplier_json(id: i64) -> Value {
    serde_json::json!({
        "id": id,
        "name": format!("ACME {id}"),
        "sap": format!("S{id:04}"),
        "type": "直接供应",
    })
}
