//! Product model entity and DTOs.

use qms_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::supplier::Supplier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModel {
    pub id: DbId,
    /// SAP material code.
    pub sap: String,
    /// Serial code prefix.
    pub sn: String,
    pub description: String,
    pub supplier_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
}

/// DTO for creating a product model. `supplier_id` stays `None` until the
/// form's supplier selector is filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductModel {
    pub sap: String,
    pub sn: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductModel {
    pub id: DbId,
    pub sap: String,
    pub sn: String,
    pub description: String,
    pub supplier_id: DbId,
}

impl From<&ProductModel> for UpdateProductModel {
    fn from(m: &ProductModel) -> Self {
        Self {
            id: m.id,
            sap: m.sap.clone(),
            sn: m.sn.clone(),
            description: m.description.clone(),
            supplier_id: m.supplier_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_supplier_is_optional() {
        let json = r#"{"id":1,"sap":"M1","sn":"SN","description":"Motor 60W","supplierId":3}"#;
        let m: ProductModel = serde_json::from_str(json).unwrap();
        assert_eq!(m.supplier_id, 3);
        assert!(m.supplier.is_none());
    }

    #[test]
    fn update_never_writes_back_the_relation() {
        let json = r#"{"id":1,"sap":"M1","sn":"SN","description":"d","supplierId":3,
            "supplier":{"id":3,"name":"ACME","sap":"V1","type":"贸易商"}}"#;
        let m: ProductModel = serde_json::from_str(json).unwrap();
        let body = serde_json::to_value(UpdateProductModel::from(&m)).unwrap();
        assert!(body.get("supplier").is_none());
        assert_eq!(body["supplierId"], 3);
    }
}
