//! Query-string shapes for list and report endpoints.
//!
//! Every query carries the paging pair. `page_num` is skipped when absent so
//! that an unpaginated request sends only `pageSize=-1`. Optional filters are
//! skipped when `None`; callers are expected to have trimmed text already.

use qms_core::pagination::PageRequest;
use qms_core::types::DbId;
use serde::Serialize;

/// Keyword search used by every plain management list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    pub page_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl KeywordQuery {
    pub fn new(page: PageRequest, keyword: Option<String>) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            keyword,
        }
    }

    /// No filter at all, e.g. when loading options for a selector.
    pub fn unfiltered(page: PageRequest) -> Self {
        Self::new(page, None)
    }
}

/// Product search. The search view always fills `description` and refuses to
/// run while it is empty; pallet lookups leave it out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    pub page_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_line_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_defect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_reason: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pallet_id: Option<DbId>,
}

impl ProductQuery {
    pub fn page(page: PageRequest) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            ..Self::default()
        }
    }

    /// Every product stored on one pallet, up to `page_size`.
    pub fn on_pallet(pallet_id: DbId, page_size: i32) -> Self {
        Self {
            pallet_id: Some(pallet_id),
            ..Self::page(PageRequest::capped(page_size))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    pub page_size: i32,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<DbId>,
    /// Product model description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DefectReportQuery {
    pub fn page(page: PageRequest) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    pub page_size: i32,
    #[serde(rename = "productModelSN", skip_serializing_if = "Option::is_none")]
    pub product_model_sn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl InspectionReportQuery {
    pub fn page(page: PageRequest) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    pub page_size: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(rename = "productModelSN", skip_serializing_if = "Option::is_none")]
    pub product_model_sn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl CostReportQuery {
    pub fn page(page: PageRequest) -> Self {
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unpaginated_keyword_query_omits_page_num() {
        let q = KeywordQuery::unfiltered(PageRequest::unpaginated());
        assert_eq!(serde_json::to_value(&q).unwrap(), json!({"pageSize": -1}));
    }

    #[test]
    fn pallet_query_sends_only_pallet_and_size() {
        let q = ProductQuery::on_pallet(42, 1000);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"pageSize": 1000, "palletId": 42})
        );
    }

    #[test]
    fn report_queries_use_upper_case_serial_keys() {
        let mut q = CostReportQuery::page(PageRequest::page(2, 20));
        q.product_model_sn = Some("M-9".into());
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({"pageNum": 2, "pageSize": 20, "productModelSN": "M-9"})
        );
    }
}
