//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use attar_app::domain::orders::records::OrderAccess;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderSummaryResponse},
    state::State,
};

/// List Orders Handler
///
/// Customers see their own orders; sellers and admins see every order. Newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderSummaryResponse>>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders(OrderAccess::from(principal))
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
