//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Clear Cart Handler
///
/// Clearing an already empty cart also succeeds.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    status_codes(204)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .clear(principal.user_uuid)
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
