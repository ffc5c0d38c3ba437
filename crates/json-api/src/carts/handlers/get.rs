//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart priced against the live catalog.
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(principal.user_uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use attar_app::domain::carts::{
        MockCartsService,
        records::{CartItemUuid, CartRecord},
    };

    use crate::{
        carts::responses::fixtures::make_cart_item,
        test_helpers::{CUSTOMER, TEST_USER_UUID, TestState},
    };

    use super::*;

    #[tokio::test]
    async fn test_get_cart_returns_totals() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| {
                Ok(CartRecord::from_items(vec![make_cart_item(CartItemUuid::new(), 2)])
                    .unwrap_or_default())
            });

        let service = TestState::default()
            .with_carts(carts)
            .service(CUSTOMER, Router::with_path("cart").get(handler));

        let mut res = TestClient::get("http://example.com/cart").send(&service).await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["subtotal"], 90_00);
        assert_eq!(body["itemCount"], 2);
        assert_eq!(body["items"][0]["lineTotal"], 90_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_gets_401() {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let service = TestState::default()
            .with_carts(carts)
            .anonymous_service(Router::with_path("cart").get(handler));

        let res = TestClient::get("http://example.com/cart").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
