//! Response envelope shared by the management endpoints.

use qms_core::pagination::Pagination;
use serde::{Deserialize, Deserializer, Serialize};

/// `{data, pagination?, message?}` as sent by every enveloped endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Envelope<Vec<T>>> for Page<T> {
    /// A `null` data array is empty; a missing pagination block means the
    /// rows are the whole result.
    fn from(env: Envelope<Vec<T>>) -> Self {
        let items = env.data.unwrap_or_default();
        let total = match env.pagination {
            Some(p) => p.total,
            None => items.len() as u64,
        };
        Self { items, total }
    }
}

/// Acknowledgement of a create, update or delete. The payload is whatever
/// the backend chose to echo back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Ack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// Read the body of a successful write. Anything that is not an
    /// `{data, message}` object is kept as the payload.
    pub fn from_body(body: serde_json::Value) -> Self {
        if body.is_object() {
            if let Ok(ack) = serde_json::from_value::<Self>(body.clone()) {
                return ack;
            }
        }
        Self {
            data: body,
            message: None,
        }
    }
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
