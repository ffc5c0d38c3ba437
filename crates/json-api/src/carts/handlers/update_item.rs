//! Update Cart Item Handler

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

use crate::{
    carts::{errors::into_api_error, responses::CartItemResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the item
    pub quantity: i64,
}

/// Update Cart Item Handler
///
/// Responds 204 when the quantity removed the item, otherwise 200 with a
/// `CartItemResponse` body.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    status_codes(200, 204, 400, 404)
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .carts
        .update_quantity(
            principal.user_uuid,
            item.into_inner().into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_api_error)?;

    let Some(item) = updated else {
        return Ok(StatusCode::NO_CONTENT);
    };

    res.render(Json(CartItemResponse::from(item)));

    Ok(StatusCode::OK)
}
