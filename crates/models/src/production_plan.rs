//! Production plan entity and DTOs.

use qms_core::datetime::deserialize_timestamp;
use qms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::product_model::ProductModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlan {
    pub id: DbId,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub start_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub end_at: Option<Timestamp>,
    /// Owning unit (workshop or shift) the plan belongs to.
    pub belongs_to: String,
    pub product_model_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_model: Option<ProductModel>,
    pub planned: i64,
    /// `None` until the backend has counted finished products.
    pub actual: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductionPlan {
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub belongs_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_model_id: Option<DbId>,
    pub planned: i64,
    pub actual: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductionPlan {
    pub id: DbId,
    /// `None` leaves the stored value untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<Timestamp>,
    pub belongs_to: String,
    pub product_model_id: DbId,
    pub planned: i64,
    pub actual: Option<i64>,
}

impl From<&ProductionPlan> for UpdateProductionPlan {
    fn from(p: &ProductionPlan) -> Self {
        Self {
            id: p.id,
            start_at: p.start_at,
            end_at: p.end_at,
            belongs_to: p.belongs_to.clone(),
            product_model_id: p.product_model_id,
            planned: p.planned,
            actual: p.actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actual_count_may_be_null() {
        let json = r#"{"id":9,"startAt":"2024-05-01T08:00:00+08:00","endAt":"2024-05-01T20:00:00+08:00",
            "belongsTo":"Workshop 2","productModelId":4,"planned":500,"actual":null}"#;
        let plan: ProductionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.actual, None);
        assert_eq!(plan.planned, 500);
        assert_eq!(plan.start_at.unwrap().offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn unreadable_window_is_not_sent_back() {
        let json = r#"{"id":9,"startAt":"2024-05-01 08:00:00","endAt":"",
            "belongsTo":"Workshop 2","productModelId":4,"planned":500,"actual":12}"#;
        let plan: ProductionPlan = serde_json::from_str(json).unwrap();
        assert!(plan.start_at.is_some());
        assert_eq!(plan.end_at, None);

        let dto = serde_json::to_value(UpdateProductionPlan::from(&plan)).unwrap();
        assert!(dto.get("startAt").is_some());
        assert!(dto.get("endAt").is_none());
    }
}
