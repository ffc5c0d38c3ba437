//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::carts::{data::NewCartItem, records::CartItemUuid};

use crate::{
    carts::{errors::into_api_error, responses::CartItemResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adding a product already in the cart sums the quantities.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Out of stock or invalid quantity"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let item = state
        .app
        .carts
        .add_item(
            principal.user_uuid,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product_uuid: request.product_uuid.into(),
                variant_uuid: request.variant_uuid.map(Into::into),
                quantity: request.quantity,
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use attar_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::{
        carts::responses::fixtures::make_cart_item,
        test_helpers::{CUSTOMER, TEST_USER_UUID, TestState},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestState::default()
            .with_carts(carts)
            .service(CUSTOMER, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_returns_201() -> TestResult {
        let product = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, item| {
                *user == TEST_USER_UUID && item.product_uuid == product && item.quantity == 2
            })
            .return_once(|_, item| Ok(make_cart_item(item.uuid, item.quantity)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "productUuid": product.into_uuid(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_stock_reports_available() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::OutOfStock { available: 1 }));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "productUuid": Uuid::now_v7(), "quantity": 4 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["errorCode"], "OUT_OF_STOCK");
        assert_eq!(body["available"], 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "productUuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
