//! Keyword-searched management tables.

use std::fmt::Debug;
use std::marker::PhantomData;

use qms_client::resource::Resource;
use qms_client::{ApiError, ManagementApi};
use qms_core::filters::text_filter;
use qms_core::pagination::PageRequest;
use qms_models::api_credential::ApiCredential;
use qms_models::pallet::Pallet;
use qms_models::product_line::ProductLine;
use qms_models::product_model::ProductModel;
use qms_models::production_plan::ProductionPlan;
use qms_models::query::KeywordQuery;
use qms_models::response::Page;
use qms_models::supplier::Supplier;
use qms_models::user::User;

use crate::view::{ListView, ViewSpec};

/// An entity listed with a single keyword box.
pub trait Listed: Resource + Clone + Debug {
    /// Plural label used in notices.
    const PLURAL: &'static str;
}

impl Listed for Supplier {
    const PLURAL: &'static str = "suppliers";
}

impl Listed for ProductModel {
    const PLURAL: &'static str = "product models";
}

impl Listed for ProductionPlan {
    const PLURAL: &'static str = "production plans";
}

impl Listed for ProductLine {
    const PLURAL: &'static str = "product lines";
}

impl Listed for Pallet {
    const PLURAL: &'static str = "pallets";
}

impl Listed for User {
    const PLURAL: &'static str = "users";
}

impl Listed for ApiCredential {
    const PLURAL: &'static str = "apis";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilters {
    pub keyword: String,
}

/// [`ViewSpec`] for any [`Listed`] entity.
pub struct EntitySpec<R>(PhantomData<fn() -> R>);

impl<R: Listed> ViewSpec for EntitySpec<R> {
    type Row = R;
    type Filters = KeywordFilters;
    type Query = KeywordQuery;

    const LABEL: &'static str = R::PLURAL;

    fn build_query(filters: &KeywordFilters, page: PageRequest) -> KeywordQuery {
        KeywordQuery::new(page, text_filter(&filters.keyword))
    }

    async fn fetch(api: &ManagementApi, query: &KeywordQuery) -> Result<Page<R>, ApiError> {
        api.resource::<R>().list(query).await
    }
}

pub type SupplierView = ListView<EntitySpec<Supplier>>;
pub type ProductModelView = ListView<EntitySpec<ProductModel>>;
pub type ProductionPlanView = ListView<EntitySpec<ProductionPlan>>;
pub type ProductLineView = ListView<EntitySpec<ProductLine>>;
pub type PalletView = ListView<EntitySpec<Pallet>>;
pub type UserView = ListView<EntitySpec<User>>;
pub type ApiCredentialView = ListView<EntitySpec<ApiCredential>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_is_omitted() {
        let filters = KeywordFilters {
            keyword: "   ".into(),
        };
        let query = EntitySpec::<Supplier>::build_query(&filters, PageRequest::page(1, 10));
        assert_eq!(query.keyword, None);
    }

    #[test]
    fn keyword_is_trimmed() {
        let filters = KeywordFilters {
            keyword: "  ACME ".into(),
        };
        let query = EntitySpec::<User>::build_query(&filters, PageRequest::page(2, 20));
        assert_eq!(query.keyword.as_deref(), Some("ACME"));
        assert_eq!(query.page_num, Some(2));
        assert_eq!(query.page_size, 20);
    }
}
