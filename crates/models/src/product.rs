//! Product (finished motor) entity, read-only in the console.

use qms_core::datetime::deserialize_timestamp;
use qms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::pallet::Pallet;
use crate::product_line::ProductLine;
use crate::product_model::ProductModel;
use crate::production_plan::ProductionPlan;

/// Defect reasons the inspection stations report, as the backend spells them.
pub const DEFECT_REASONS: [&str; 5] = [
    "外观不良",
    "绝缘耐压不良",
    "反电动势不良",
    "电阻不良",
    "噪音不良",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub sn: String,
    pub product_model_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_model: Option<ProductModel>,
    pub product_line_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_line: Option<ProductLine>,
    pub production_plan_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_plan: Option<ProductionPlan>,
    pub pallet_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pallet: Option<Pallet>,
    pub has_defect: bool,
    #[serde(default)]
    pub defect_reason: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Product {
    pub fn pallet_sn(&self) -> Option<&str> {
        self.pallet.as_ref().map(|p| p.sn.as_str())
    }

    pub fn product_line_name(&self) -> Option<&str> {
        self.product_line.as_ref().map(|l| l.name.as_str())
    }

    pub fn model_description(&self) -> Option<&str> {
        self.product_model.as_ref().map(|m| m.description.as_str())
    }
}
