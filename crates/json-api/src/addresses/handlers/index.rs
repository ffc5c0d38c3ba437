//! List Addresses Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// List Addresses Handler
#[endpoint(tags("addresses"), summary = "List Addresses", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<AddressResponse>>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let addresses = state
        .app
        .addresses
        .list_addresses(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(addresses.into_iter().map(Into::into).collect()))
}
