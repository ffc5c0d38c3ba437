//! Merge Guest Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::carts::data::CartLine;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// A line of the cart a visitor built before signing in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestCartLine {
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub quantity: u32,
}

impl From<GuestCartLine> for CartLine {
    fn from(line: GuestCartLine) -> Self {
        CartLine {
            product_uuid: line.product_uuid.into(),
            variant_uuid: line.variant_uuid.map(Into::into),
            quantity: line.quantity,
        }
    }
}

/// Merge Guest Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MergeCartRequest {
    pub items: Vec<GuestCartLine>,
}

/// Merge Guest Cart Handler
///
/// Folds the guest cart into the caller's cart. Quantities are capped at live stock and
/// unavailable products are dropped.
#[endpoint(tags("cart"), summary = "Merge Guest Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    json: JsonBody<MergeCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines = json.into_inner().items.into_iter().map(Into::into).collect();

    let cart = state
        .app
        .carts
        .merge_guest_cart(principal.user_uuid, lines)
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}
