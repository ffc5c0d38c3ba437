//! Create Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use attar_app::domain::addresses::{
    data::NewAddress,
    records::{AddressKind, AddressUuid},
};

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAddressRequest {
    /// `shipping` (default) or `billing`
    pub kind: Option<String>,
    pub full_name: String,
    pub phone: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

impl CreateAddressRequest {
    fn into_new_address(self) -> Result<NewAddress, StatusError> {
        let kind = match self.kind.as_deref() {
            None => AddressKind::Shipping,
            Some(kind) => kind.parse::<AddressKind>().or_400("Unknown address kind")?,
        };

        Ok(NewAddress {
            uuid: AddressUuid::new(),
            kind,
            full_name: self.full_name,
            phone: self.phone,
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
            is_default: self.is_default,
        })
    }
}

/// Create Address Handler
///
/// The first address of a kind becomes its default.
#[endpoint(
    tags("addresses"),
    summary = "Create Address",
    security(("bearer_auth" = [])),
    status_codes(201, 400)
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let address = json.into_inner().into_new_address()?;

    let created = state
        .app
        .addresses
        .create_address(principal.user_uuid, address)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
