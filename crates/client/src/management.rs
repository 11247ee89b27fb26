//! Facade over every management endpoint.

use std::sync::Arc;

use chrono::NaiveDate;
use qms_core::datetime::DATE_FORMAT;
use qms_models::api_credential::ApiCredential;
use qms_models::auth::{LoginRequest, LoginResponse};
use qms_models::dashboard::{DashboardQuery, QualityStats};
use qms_models::pallet::Pallet;
use qms_models::product::Product;
use qms_models::product_line::ProductLine;
use qms_models::product_model::ProductModel;
use qms_models::production_plan::ProductionPlan;
use qms_models::query::{CostReportQuery, DefectReportQuery, InspectionReportQuery};
use qms_models::report::{CostReportItem, DefectReportItem, InspectionReportItem};
use qms_models::response::{Envelope, Page};
use qms_models::supplier::Supplier;
use qms_models::user::User;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpClient, NONE};
use crate::resource::{Resource, ResourceClient, MANAGEMENT_PREFIX};

/// Cheap to clone; every clone shares one [`HttpClient`].
#[derive(Clone)]
pub struct ManagementApi {
    http: Arc<HttpClient>,
}

impl ManagementApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(Arc::clone(&self.http))
    }

    pub fn suppliers(&self) -> ResourceClient<Supplier> {
        self.resource()
    }

    pub fn product_models(&self) -> ResourceClient<ProductModel> {
        self.resource()
    }

    pub fn production_plans(&self) -> ResourceClient<ProductionPlan> {
        self.resource()
    }

    pub fn product_lines(&self) -> ResourceClient<ProductLine> {
        self.resource()
    }

    pub fn pallets(&self) -> ResourceClient<Pallet> {
        self.resource()
    }

    pub fn products(&self) -> ResourceClient<Product> {
        self.resource()
    }

    pub fn users(&self) -> ResourceClient<User> {
        self.resource()
    }

    pub fn api_credentials(&self) -> ResourceClient<ApiCredential> {
        self.resource()
    }

    /// `POST /management/login`. The answer is not enveloped.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let path = format!("{MANAGEMENT_PREFIX}/login");
        self.http.request(Method::POST, &path, NONE, Some(request)).await
    }

    /// Aggregated quality statistics for the dashboard.
    pub async fn dashboard_stats(&self, query: &DashboardQuery) -> Result<QualityStats, ApiError> {
        let path = format!("{MANAGEMENT_PREFIX}/quality_stats");
        let envelope: Envelope<QualityStats> =
            self.http.request(Method::GET, &path, Some(query), NONE).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn defect_report(
        &self,
        query: &DefectReportQuery,
    ) -> Result<Page<DefectReportItem>, ApiError> {
        self.report("defect", query).await
    }

    pub async fn inspection_report(
        &self,
        query: &InspectionReportQuery,
    ) -> Result<Page<InspectionReportItem>, ApiError> {
        self.report("inspection", query).await
    }

    pub async fn cost_report(&self, query: &CostReportQuery) -> Result<Page<CostReportItem>, ApiError> {
        self.report("cost", query).await
    }

    /// Production plans running on `date`.
    pub async fn production_plans_on(&self, date: NaiveDate) -> Result<Vec<ProductionPlan>, ApiError> {
        #[derive(Serialize)]
        struct DateQuery {
            date: String,
        }

        let path = format!("{MANAGEMENT_PREFIX}/production_plan/date_range");
        let query = DateQuery {
            date: date.format(DATE_FORMAT).to_string(),
        };
        let envelope: Envelope<Vec<ProductionPlan>> =
            self.http.request(Method::GET, &path, Some(&query), NONE).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn report<T, Q>(&self, kind: &str, query: &Q) -> Result<Page<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let path = format!("{MANAGEMENT_PREFIX}/report/{kind}");
        let envelope: Envelope<Vec<T>> =
            self.http.request(Method::GET, &path, Some(query), NONE).await?;
        Ok(Page::from(envelope))
    }
}
