//! Supplier entity model and DTOs.

use qms_core::types::DbId;
use serde::{Deserialize, Serialize};

/// How a supplier delivers parts. Wire values are the backend's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierType {
    #[serde(rename = "直接供应")]
    DirectSupply,
    #[serde(rename = "贸易商")]
    Trading,
}

impl SupplierType {
    pub fn label(&self) -> &'static str {
        match self {
            SupplierType::DirectSupply => "direct supply",
            SupplierType::Trading => "trading",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    /// SAP vendor code.
    pub sap: String,
    #[serde(rename = "type")]
    pub supplier_type: SupplierType,
}

/// DTO for creating a new supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    pub name: String,
    pub sap: String,
    #[serde(rename = "type")]
    pub supplier_type: SupplierType,
}

/// DTO for replacing an existing supplier (`PUT` carries the id in the body).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplier {
    pub id: DbId,
    pub name: String,
    pub sap: String,
    #[serde(rename = "type")]
    pub supplier_type: SupplierType,
}

impl From<&Supplier> for UpdateSupplier {
    fn from(s: &Supplier) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            sap: s.sap.clone(),
            supplier_type: s.supplier_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_type_uses_backend_labels() {
        let json = serde_json::to_value(SupplierType::Trading).unwrap();
        assert_eq!(json, "贸易商");
        let parsed: SupplierType = serde_json::from_str("\"直接供应\"").unwrap();
        assert_eq!(parsed, SupplierType::DirectSupply);
    }

    #[test]
    fn create_payload_has_no_id() {
        let dto = CreateSupplier {
            name: "ACME".into(),
            sap: "V100".into(),
            supplier_type: SupplierType::DirectSupply,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["type"], "直接供应");
    }
}
