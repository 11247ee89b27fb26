//! Pallet entity (read-only in the console).

use qms_core::datetime::deserialize_timestamp;
use qms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::product_line::ProductLine;
use crate::product_model::ProductModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pallet {
    pub id: DbId,
    pub sn: String,
    pub product_model_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_model: Option<ProductModel>,
    pub product_line_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_line: Option<ProductLine>,
    /// Number of products the pallet is meant to hold.
    pub goal: i64,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}
