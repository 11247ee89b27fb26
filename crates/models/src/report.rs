//! Row types returned by the report endpoints.
//!
//! Dates stay as the raw strings the backend sends; they are only formatted
//! when rendered into an export.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectReportItem {
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub quality_date: String,
    #[serde(rename = "productSN", default)]
    pub product_sn: String,
    #[serde(rename = "productModelSN", default)]
    pub product_model_sn: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub defect_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReportItem {
    #[serde(rename = "productModelSN", default)]
    pub product_model_sn: String,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub inspection_count: i64,
    #[serde(default)]
    pub qualified_count: i64,
    #[serde(default)]
    pub unqualified_count: i64,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inspection_date: String,
}

impl InspectionReportItem {
    /// `SN/batch`, or whichever half is present.
    pub fn model_and_batch(&self) -> String {
        match (self.product_model_sn.is_empty(), self.batch_number.is_empty()) {
            (false, false) => format!("{}/{}", self.product_model_sn, self.batch_number),
            (false, true) => self.product_model_sn.clone(),
            (true, _) => self.batch_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReportItem {
    #[serde(default)]
    pub supplier_name: String,
    #[serde(rename = "productModelSN", default)]
    pub product_model_sn: String,
    #[serde(default)]
    pub motor_type: String,
    #[serde(default)]
    pub qualified_count: i64,
    #[serde(default)]
    pub unqualified_count: i64,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub test_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_fields_keep_upper_case_suffix() {
        let json = r#"{"supplierName":"ACME","qualityDate":"2024-05-01T08:00:00+08:00",
            "productSN":"P-1","productModelSN":"M-9","batchNumber":"B1","defectReason":"外观不良"}"#;
        let row: DefectReportItem = serde_json::from_str(json).unwrap();
        assert_eq!(row.product_sn, "P-1");
        assert_eq!(row.product_model_sn, "M-9");
        assert_eq!(row.description, None);
    }

    #[test]
    fn model_and_batch_joins_present_halves() {
        let mut row: InspectionReportItem = serde_json::from_str(
            r#"{"productModelSN":"M-9","batchNumber":"B1","inspectionCount":5,
                "qualifiedCount":4,"unqualifiedCount":1,"supplierName":"ACME",
                "inspectionDate":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(row.model_and_batch(), "M-9/B1");
        row.batch_number.clear();
        assert_eq!(row.model_and_batch(), "M-9");
        row.product_model_sn.clear();
        row.batch_number = "B2".into();
        assert_eq!(row.model_and_batch(), "B2");
    }
}
