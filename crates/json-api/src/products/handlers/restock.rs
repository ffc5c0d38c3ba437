//! Restock Product Handler

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

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Restock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestockRequest {
    /// Restock a single variant instead of the base product
    pub variant_uuid: Option<Uuid>,
    pub quantity: u32,
}

/// Restock Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestockResponse {
    /// Stock level after the restock
    pub stock: u32,
}

/// Restock Product Handler
#[endpoint(
    tags("products"),
    summary = "Restock Product",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 403, 404)
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<RestockRequest>,
    depot: &mut Depot,
) -> Result<Json<RestockResponse>, StatusError> {
    depot.staff_or_403()?;

    let request = json.into_inner();

    if request.quantity == 0 {
        return Err(StatusError::bad_request().brief("quantity must be at least 1"));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stock = state
        .app
        .products
        .restock(
            product.into_inner().into(),
            request.variant_uuid.map(Into::into),
            request.quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(RestockResponse { stock }))
}
