//! Create Product Variant Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::products::{data::NewProductVariant, records::ProductVariantUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::VariantResponse},
    state::State,
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateVariantRequest {
    pub uuid: Option<Uuid>,

    /// Size or concentration label, e.g. "12ml"
    pub name: String,
    pub sku: Option<String>,

    /// Falls back to the product price when omitted
    pub price: Option<u64>,
    #[serde(default)]
    pub stock: u32,
}

impl From<CreateVariantRequest> for NewProductVariant {
    fn from(request: CreateVariantRequest) -> Self {
        NewProductVariant {
            uuid: request
                .uuid
                .map_or_else(ProductVariantUuid::new, ProductVariantUuid::from_uuid),
            name: request.name,
            sku: request.sku,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Create Product Variant Handler
#[endpoint(
    tags("products"),
    summary = "Create Product Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "SKU already in use"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not staff"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    depot.staff_or_403()?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let variant = state
        .app
        .products
        .create_variant(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(variant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use attar_app::domain::products::{
        MockProductsService, ProductsServiceError,
        records::{ProductUuid, ProductVariantRecord},
    };

    use crate::test_helpers::{ADMIN, TEST_TIMESTAMP, TestState};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestState::default().with_products(products).service(
            ADMIN,
            Router::with_path("products/{product}/variants").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_variant_returns_201() -> TestResult {
        let product = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_create_variant()
            .once()
            .withf(move |p, v| *p == product && v.name == "12ml" && v.price.is_none())
            .return_once(move |product_uuid, new| {
                Ok(ProductVariantRecord {
                    uuid: new.uuid,
                    product_uuid,
                    name: new.name,
                    sku: new.sku,
                    price: new.price,
                    stock: new.stock,
                    created_at: TEST_TIMESTAMP,
                    updated_at: TEST_TIMESTAMP,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/products/{product}/variants"))
            .json(&json!({ "name": "12ml", "stock": 3 }))
            .send(&make_service(products))
            .await;

        let body: VariantResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.stock, 3);
        assert_eq!(body.price, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_variant_for_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_variant()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/products/{}/variants",
            ProductUuid::new()
        ))
        .json(&json!({ "name": "6ml" }))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
