//! Update Order Status Handler

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

use attar_app::domain::orders::{data::StatusChange, status::OrderStatus};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderDetailResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStatusRequest {
    /// One of `pending`, `confirmed`, `processing`, `shipped`, `delivered`, `cancelled`,
    /// `refunded`
    pub status: String,

    /// Recorded on the tracking entry
    pub location: Option<String>,
}

/// Update Order Status Handler
///
/// Staff only. Each accepted change appends exactly one tracking entry; cancelling or
/// refunding before shipment puts the stock back.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 403, 404, 409)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let status = request.status.parse::<OrderStatus>().or_400("Unknown order status")?;

    let detail = state
        .app
        .orders
        .update_status(
            principal,
            order.into_inner().into(),
            StatusChange {
                status,
                location: request.location,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(detail.into()))
}
