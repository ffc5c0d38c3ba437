//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::orders::{
    data::{AddressChoice, NewOrder},
    records::OrderUuid,
    snapshots::AddressSnapshot,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::record_checkout,
    orders::{
        errors::{checkout_outcome, into_api_error},
        responses::OrderDetailResponse,
    },
    state::State,
};

/// Header a client sets to make checkout retries safe.
pub(crate) const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

const MAX_IDEMPOTENCY_KEY_LEN: usize = 255;

/// An address typed in at checkout. Missing fields are reported back as `INVALID_ADDRESS`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AddressInput {
    pub full_name: String,
    pub phone: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressInput> for AddressSnapshot {
    fn from(input: AddressInput) -> Self {
        AddressSnapshot {
            full_name: input.full_name,
            phone: input.phone,
            line1: input.line1,
            line2: input.line2,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
        }
    }
}

/// Create Order Request
///
/// The cart is always the caller's current cart. An inline address takes precedence over a
/// saved one; with neither, the default shipping address is used.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub shipping_address: Option<AddressInput>,
    pub shipping_address_uuid: Option<Uuid>,

    /// Bills to the shipping address when both billing fields are omitted
    pub billing_address: Option<AddressInput>,
    pub billing_address_uuid: Option<Uuid>,

    /// Defaults to cash on delivery
    pub payment_method: Option<String>,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
}

fn address_choice(inline: Option<AddressInput>, saved: Option<Uuid>) -> Option<AddressChoice> {
    match (inline, saved) {
        (Some(inline), _) => Some(AddressChoice::Inline(inline.into())),
        (None, Some(saved)) => Some(AddressChoice::Saved(saved.into())),
        (None, None) => None,
    }
}

impl CreateOrderRequest {
    fn into_new_order(self, idempotency_key: Option<String>) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            shipping_address: address_choice(self.shipping_address, self.shipping_address_uuid)
                .unwrap_or(AddressChoice::Default),
            billing_address: address_choice(self.billing_address, self.billing_address_uuid),
            payment_method: self.payment_method,
            coupon_code: self.coupon_code,
            notes: self.notes,
            idempotency_key,
        }
    }
}

fn idempotency_key(req: &Request) -> Result<Option<String>, StatusError> {
    let Some(key) = req.header::<String>(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };

    let key = key.trim();

    if key.len() > MAX_IDEMPOTENCY_KEY_LEN {
        return Err(StatusError::bad_request().brief("Idempotency-Key is too long"));
    }

    Ok((!key.is_empty()).then(|| key.to_string()))
}

/// Create Order Handler
///
/// Checks out the caller's cart: validates stock, prices the order, decrements inventory,
/// clears the cart and records the first tracking entry, all or nothing. Retrying with the
/// same `Idempotency-Key` returns the original order with 200.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::OK, description = "Replay of an earlier order with the same Idempotency-Key"),
        (status_code = StatusCode::BAD_REQUEST, description = "EMPTY_CART, INSUFFICIENT_STOCK, INVALID_ADDRESS, INVALID_COUPON or INVALID_PAYMENT_METHOD"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_order = json.into_inner().into_new_order(idempotency_key(req)?);

    let result = state
        .app
        .orders
        .create_order(principal.user_uuid, new_order)
        .await;

    record_checkout(checkout_outcome(&result));

    let placement = result.map_err(into_api_error)?;

    if placement.replayed {
        res.status_code(StatusCode::OK);
    } else {
        res.add_header(
            LOCATION,
            format!("/api/orders/{}", placement.detail.order.uuid),
            true,
        )
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);
    }

    Ok(Json(placement.detail.into()))
}
