//! Update Order Tracking Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use attar_app::domain::orders::data::TrackingUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderDetailResponse},
    state::State,
};

/// Update Order Tracking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTrackingRequest {
    /// Carrier tracking number, e.g. an AWB
    pub tracking_number: Option<String>,
    pub message: Option<String>,
    pub location: Option<String>,
    pub metadata: Option<Value>,
}

/// Update Order Tracking Handler
///
/// Staff only. Sets the tracking number and appends a timeline entry without changing
/// the order's status.
#[endpoint(
    tags("orders"),
    summary = "Update Order Tracking",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 403, 404)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateTrackingRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let detail = state
        .app
        .orders
        .update_tracking(
            principal,
            order.into_inner().into(),
            TrackingUpdate {
                tracking_number: request.tracking_number,
                message: request.message,
                location: request.location,
                metadata: request.metadata,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(detail.into()))
}
