//! Product line entity and DTOs.

use qms_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub id: DbId,
    pub name: String,
    /// Prefix stamped on pallet serials produced by this line.
    pub pallet_sn_prefix: String,
    pub device_id: String,
    #[serde(default)]
    pub is_registered: bool,
    #[serde(default)]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductLine {
    pub name: String,
    pub pallet_sn_prefix: String,
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductLine {
    pub id: DbId,
    pub name: String,
    pub pallet_sn_prefix: String,
    pub device_id: String,
}

impl From<&ProductLine> for UpdateProductLine {
    fn from(l: &ProductLine) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            pallet_sn_prefix: l.pallet_sn_prefix.clone(),
            device_id: l.device_id.clone(),
        }
    }
}
