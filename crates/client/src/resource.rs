//! Typed CRUD access to one management resource.
//!
//! Paths are `/management/<resource>` for the collection and
//! `/management/<resource>/{id}` for one record. Updates are `PUT` on the
//! collection with the id inside the body, and deletes are always a batch
//! `DELETE` carrying `{ids: [...]}`.

use std::marker::PhantomData;
use std::sync::Arc;

use qms_core::types::DbId;
use qms_models::api_credential::{ApiCredential, CreateApiCredential, UpdateApiCredential};
use qms_models::pallet::Pallet;
use qms_models::product::Product;
use qms_models::product_line::{CreateProductLine, ProductLine, UpdateProductLine};
use qms_models::product_model::{CreateProductModel, ProductModel, UpdateProductModel};
use qms_models::production_plan::{CreateProductionPlan, ProductionPlan, UpdateProductionPlan};
use qms_models::response::{Ack, Envelope, Page};
use qms_models::supplier::{CreateSupplier, Supplier, UpdateSupplier};
use qms_models::user::{CreateUser, UpdateUser, User};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpClient, NONE};

/// Prefix shared by every console endpoint.
pub const MANAGEMENT_PREFIX: &str = "/management";

/// An entity served under `/management/<PATH>`.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Wire path segment, e.g. `product_model`.
    const PATH: &'static str;
    /// Singular display name used in notices and errors.
    const NAME: &'static str;
}

/// A resource the console may create, update and delete.
pub trait MutableResource: Resource {
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
}

macro_rules! resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
        }
    };
    ($ty:ty, $path:literal, $name:literal, $create:ty, $update:ty) => {
        resource!($ty, $path, $name);

        impl MutableResource for $ty {
            type Create = $create;
            type Update = $update;
        }
    };
}

resource!(Supplier, "supplier", "Supplier", CreateSupplier, UpdateSupplier);
resource!(ProductModel, "product_model", "Product model", CreateProductModel, UpdateProductModel);
resource!(
    ProductionPlan,
    "production_plan",
    "Production plan",
    CreateProductionPlan,
    UpdateProductionPlan
);
resource!(ProductLine, "product_line", "Product line", CreateProductLine, UpdateProductLine);
resource!(User, "user", "User", CreateUser, UpdateUser);
resource!(ApiCredential, "api", "API", CreateApiCredential, UpdateApiCredential);
resource!(Pallet, "pallet", "Pallet");
resource!(Product, "product", "Product");

#[derive(Serialize)]
struct DeleteBody<'a> {
    ids: &'a [DbId],
}

/// CRUD client for a single resource type.
pub struct ResourceClient<R> {
    http: Arc<HttpClient>,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            _marker: PhantomData,
        }
    }

    pub fn collection_path() -> String {
        format!("{MANAGEMENT_PREFIX}/{}", R::PATH)
    }

    pub fn item_path(id: DbId) -> String {
        format!("{}/{id}", Self::collection_path())
    }

    /// One page of records matching `query`.
    pub async fn list<Q>(&self, query: &Q) -> Result<Page<R>, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let envelope: Envelope<Vec<R>> = self
            .http
            .request(Method::GET, &Self::collection_path(), Some(query), NONE)
            .await?;
        Ok(Page::from(envelope))
    }

    /// One record. A 404 becomes [`ApiError::NotFound`].
    pub async fn get(&self, id: DbId) -> Result<R, ApiError> {
        let result: Result<Envelope<R>, ApiError> = self
            .http
            .request(Method::GET, &Self::item_path(id), NONE, NONE)
            .await;
        match result {
            Ok(envelope) => envelope
                .data
                .ok_or_else(|| ApiError::Decode(format!("{} {id}: response carries no data", R::NAME))),
            Err(ApiError::Server { status: 404, .. }) => Err(ApiError::NotFound {
                entity: R::NAME,
                id,
            }),
            Err(e) => Err(e),
        }
    }
}

impl<R: MutableResource> ResourceClient<R> {
    pub async fn create(&self, dto: &R::Create) -> Result<Ack, ApiError> {
        self.http
            .execute(Method::POST, &Self::collection_path(), Some(dto))
            .await
    }

    pub async fn update(&self, dto: &R::Update) -> Result<Ack, ApiError> {
        self.http
            .execute(Method::PUT, &Self::collection_path(), Some(dto))
            .await
    }

    /// Delete every id in one request.
    pub async fn delete(&self, ids: &[DbId]) -> Result<Ack, ApiError> {
        self.http
            .execute(Method::DELETE, &Self::collection_path(), Some(&DeleteBody { ids }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_management_prefix() {
        assert_eq!(ResourceClient::<ProductModel>::collection_path(), "/management/product_model");
        assert_eq!(ResourceClient::<ApiCredential>::item_path(4), "/management/api/4");
    }

    #[test]
    fn delete_body_is_an_id_list() {
        let body = serde_json::to_value(DeleteBody { ids: &[3, 7] }).unwrap();
        assert_eq!(body, serde_json::json!({"ids": [3, 7]}));
    }
}
