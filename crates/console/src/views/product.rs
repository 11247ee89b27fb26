//! Product search table.

use qms_client::{ApiError, ManagementApi};
use qms_core::filters::{opt_text_filter, text_filter, DateRange};
use qms_core::pagination::PageRequest;
use qms_core::types::DbId;
use qms_models::product::Product;
use qms_models::query::ProductQuery;
use qms_models::response::Page;

use crate::view::{ListView, ViewSpec};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    /// Product model description; the search does not run while blank.
    pub keyword: String,
    pub product_line_id: Option<DbId>,
    pub has_defect: Option<bool>,
    /// One of [`qms_models::product::DEFECT_REASONS`].
    pub defect_reason: Option<String>,
    /// Storage time window, sent at second granularity.
    pub created: Option<DateRange>,
}

pub struct ProductSearchSpec;

impl ViewSpec for ProductSearchSpec {
    type Row = Product;
    type Filters = ProductFilters;
    type Query = ProductQuery;

    const LABEL: &'static str = "products";

    fn build_query(filters: &ProductFilters, page: PageRequest) -> ProductQuery {
        let (start_time, end_time) = match filters.created {
            Some(range) => {
                let (start, end) = range.second_bounds();
                (Some(start), Some(end))
            }
            None => (None, None),
        };
        ProductQuery {
            description: text_filter(&filters.keyword),
            product_line_id: filters.product_line_id,
            has_defect: filters.has_defect,
            defect_reason: opt_text_filter(filters.defect_reason.as_deref()),
            start_time,
            end_time,
            ..ProductQuery::page(page)
        }
    }

    fn is_ready(filters: &ProductFilters) -> bool {
        text_filter(&filters.keyword).is_some()
    }

    async fn fetch(api: &ManagementApi, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        api.products().list(query).await
    }
}

pub type ProductSearchView = ListView<ProductSearchSpec>;
