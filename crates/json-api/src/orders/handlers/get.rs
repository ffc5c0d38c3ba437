//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use attar_app::domain::orders::records::OrderAccess;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderDetailResponse},
    state::State,
};

/// Get Order Handler
///
/// Returns the order with its items and tracking history. Another customer's order is
/// reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    status_codes(200, 404)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .orders
        .get_order(OrderAccess::from(principal), order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(detail.into()))
}
