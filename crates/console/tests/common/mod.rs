//! Fake management backend and console wiring for view tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, Request};
use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{json, Value};

use qms_client::http::DEFAULT_TIMEOUT;
use qms_client::MemoryTokenStore;
use qms_console::context::Console;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
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
}

/// What the backend answers, optionally after a pause.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub async fn fake_backend<F>(responder: F) -> (String, Recorder)
where
    F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
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
            let recorded = Recorded {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
                    .map(|q| q.0)
                    .unwrap_or_default(),
                body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            };
            let reply = responder(&recorded);
            rec.0.lock().unwrap().push(recorded);
            tokio::time::sleep(reply.delay).await;
            (reply.status, Json(reply.body))
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), recorder)
}

/// A console talking to `base_url`, logged in when `token` is given.
pub fn console(base_url: &str, token: Option<&str>) -> Console {
    let store = match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    };
    Console::connect(base_url, DEFAULT_TIMEOUT, Arc::new(store)).unwrap()
}

pub fn page_body(rows: Vec<Value>, total: u64) -> Value {
    json!({
        "data": rows,
        "pagination": {"total": total, "pageNum": 1, "pageSize": 10},
    })
}

pub fn supplier_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("ACME {id}"),
        "sap": format!("S{id:04}"),
        "type": "直接供应",
    })
}

pub fn product_json(id: i64, pallet_sn: &str) -> Value {
    json!({
        "id": id,
        "sn": format!("P{id:06}"),
        "productModelId": 1,
        "productLineId": 2,
        "productLine": {"id": 2, "name": "Line 2", "palletSnPrefix": "L2", "deviceId": "dev-2"},
        "productionPlanId": 3,
        "palletId": 4,
        "pallet": {
            "id": 4,
            "sn": pallet_sn,
            "productModelId": 1,
            "productLineId": 2,
            "goal": 50,
            "createdAt": "2024-04-30T08:00:00+08:00",
        },
        "hasDefect": false,
        "createdAt": "2024-04-30T09:15:00+08:00",
    })
}

pub fn cost_row_json(supplier: &str, qualified: i64, unqualified: i64) -> Value {
    json!({
        "supplierName": supplier,
        "productModelSN": "M-9",
        "motorType": "BLDC",
        "qualifiedCount": qualified,
        "unqualifiedCount": unqualified,
        "totalCount": qualified + unqualified,
        "testDate": "2024-04-30T10:00:00+08:00",
    })
}
