//! API credential (external app id + secret) models and DTOs.

use qms_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A credential issued to an external system. The secret is never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredential {
    pub id: DbId,
    pub name: String,
    pub app_id: String,
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiCredential {
    pub name: String,
    pub app_id: String,
    pub secret: String,
}

/// Leaving `secret` as `None` keeps the current one.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApiCredential {
    pub id: DbId,
    pub name: String,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl std::fmt::Debug for CreateApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateApiCredential")
            .field("name", &self.name)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for UpdateApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateApiCredential")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_is_camel_case_on_the_wire() {
        let dto = CreateApiCredential {
            name: "MES bridge".into(),
            app_id: "mes-01".into(),
            secret: "s3cr3t".into(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["appId"], "mes-01");
        assert_eq!(json["secret"], "s3cr3t");
        assert!(!format!("{dto:?}").contains("s3cr3t"));
    }
}
