//! Report tables: defect, inspection and cost.
//!
//! Each report filters on a day-granularity date range plus a few text
//! fields, and exports through [`crate::export::reports`].

use chrono::NaiveDateTime;
use qms_client::{ApiError, ManagementApi};
use qms_core::filters::{text_filter, DateRange};
use qms_core::pagination::PageRequest;
use qms_core::types::DbId;
use qms_models::query::{CostReportQuery, DefectReportQuery, InspectionReportQuery};
use qms_models::report::{CostReportItem, DefectReportItem, InspectionReportItem};
use qms_models::response::Page;

use crate::export::{reports, ExportSpec, SheetLayout};
use crate::view::{ListView, ViewSpec};

fn day_bounds(range: Option<DateRange>) -> (Option<String>, Option<String>) {
    match range {
        Some(range) => {
            let (start, end) = range.day_bounds();
            (Some(start), Some(end))
        }
        None => (None, None),
    }
}

// ---------------------------------------------------------------------------
// Defect report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefectReportFilters {
    pub range: Option<DateRange>,
    pub supplier_id: Option<DbId>,
    /// Matched server-side against the product model description.
    pub model_description: String,
}

pub struct DefectReportSpec;

impl ViewSpec for DefectReportSpec {
    type Row = DefectReportItem;
    type Filters = DefectReportFilters;
    type Query = DefectReportQuery;

    const LABEL: &'static str = "defect report";

    fn build_query(filters: &DefectReportFilters, page: PageRequest) -> DefectReportQuery {
        let (start_date, end_date) = day_bounds(filters.range);
        DefectReportQuery {
            start_date,
            end_date,
            supplier_id: filters.supplier_id,
            description: text_filter(&filters.model_description),
            ..DefectReportQuery::page(page)
        }
    }

    async fn fetch(
        api: &ManagementApi,
        query: &DefectReportQuery,
    ) -> Result<Page<DefectReportItem>, ApiError> {
        api.defect_report(query).await
    }
}

impl ExportSpec for DefectReportSpec {
    const REPORT_NAME: &'static str = "DefectReport";

    fn layout(rows: &[DefectReportItem], exported_at: NaiveDateTime) -> SheetLayout {
        reports::defect_report(rows, exported_at)
    }
}

// ---------------------------------------------------------------------------
// Inspection report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionReportFilters {
    pub range: Option<DateRange>,
    pub product_model_sn: String,
    pub batch_number: String,
    pub supplier_name: String,
}

pub struct InspectionReportSpec;

impl ViewSpec for InspectionReportSpec {
    type Row = InspectionReportItem;
    type Filters = InspectionReportFilters;
    type Query = InspectionReportQuery;

    const LABEL: &'static str = "inspection report";

    fn build_query(filters: &InspectionReportFilters, page: PageRequest) -> InspectionReportQuery {
        let (start_date, end_date) = day_bounds(filters.range);
        InspectionReportQuery {
            product_model_sn: text_filter(&filters.product_model_sn),
            batch_number: text_filter(&filters.batch_number),
            supplier_name: text_filter(&filters.supplier_name),
            start_date,
            end_date,
            ..InspectionReportQuery::page(page)
        }
    }

    async fn fetch(
        api: &ManagementApi,
        query: &InspectionReportQuery,
    ) -> Result<Page<InspectionReportItem>, ApiError> {
        api.inspection_report(query).await
    }
}

impl ExportSpec for InspectionReportSpec {
    const REPORT_NAME: &'static str = "InspectionReport";

    fn layout(rows: &[InspectionReportItem], exported_at: NaiveDateTime) -> SheetLayout {
        reports::inspection_report(rows, exported_at)
    }
}

// ---------------------------------------------------------------------------
// Cost report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostReportFilters {
    pub range: Option<DateRange>,
    pub supplier_name: String,
    pub product_model_sn: String,
    pub motor_type: String,
}

pub struct CostReportSpec;

impl ViewSpec for CostReportSpec {
    type Row = CostReportItem;
    type Filters = CostReportFilters;
    type Query = CostReportQuery;

    const LABEL: &'static str = "cost report";

    fn build_query(filters: &CostReportFilters, page: PageRequest) -> CostReportQuery {
        let (start_date, end_date) = day_bounds(filters.range);
        CostReportQuery {
            supplier_name: text_filter(&filters.supplier_name),
            product_model_sn: text_filter(&filters.product_model_sn),
            motor_type: text_filter(&filters.motor_type),
            start_date,
            end_date,
            ..CostReportQuery::page(page)
        }
    }

    async fn fetch(api: &ManagementApi, query: &CostReportQuery) -> Result<Page<CostReportItem>, ApiError> {
        api.cost_report(query).await
    }
}

impl ExportSpec for CostReportSpec {
    const REPORT_NAME: &'static str = "CostReport";

    fn layout(rows: &[CostReportItem], exported_at: NaiveDateTime) -> SheetLayout {
        reports::cost_report(rows, exported_at)
    }
}

pub type DefectReportView = ListView<DefectReportSpec>;
pub type InspectionReportView = ListView<InspectionReportSpec>;
pub type CostReportView = ListView<CostReportSpec>;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn april() -> DateRange {
        DateRange::days(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn defect_query_sends_description_and_day_range() {
        let filters = DefectReportFilters {
            range: Some(april()),
            supplier_id: Some(4),
            model_description: " 12V fan ".into(),
        };
        let query = DefectReportSpec::build_query(&filters, PageRequest::page(1, 10));

        assert_eq!(query.start_date.as_deref(), Some("2024-04-01"));
        assert_eq!(query.end_date.as_deref(), Some("2024-04-30"));
        assert_eq!(query.supplier_id, Some(4));
        assert_eq!(query.description.as_deref(), Some("12V fan"));
    }

    #[test]
    fn empty_filters_send_only_paging() {
        let query = CostReportSpec::build_query(&CostReportFilters::default(), PageRequest::unpaginated());
        assert_eq!(query, CostReportQuery::page(PageRequest::unpaginated()));

        let query = InspectionReportSpec::build_query(&Default::default(), PageRequest::page(3, 20));
        assert_eq!(query.page_num, Some(3));
        assert_eq!(query.product_model_sn, None);
        assert_eq!(query.start_date, None);
    }

    #[test]
    fn inspection_query_trims_text_filters() {
        let filters = InspectionReportFilters {
            product_model_sn: "M-9 ".into(),
            batch_number: "  ".into(),
            supplier_name: "ACME".into(),
            ..Default::default()
        };
        let query = InspectionReportSpec::build_query(&filters, PageRequest::page(1, 10));
        assert_eq!(query.product_model_sn.as_deref(), Some("M-9"));
        assert_eq!(query.batch_number, None);
        assert_eq!(query.supplier_name.as_deref(), Some("ACME"));
    }
}
