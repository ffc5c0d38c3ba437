//! Add Tracking Entry Handler

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

use attar_app::domain::tracking::data::ManualEntry;

use crate::{
    extensions::*,
    state::State,
    tracking::{errors::into_status_error, responses::TrackingEntryResponse},
};

/// Add Tracking Entry Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddTrackingEntryRequest {
    pub message: String,
    pub location: Option<String>,

    /// Free-form carrier data; must be a JSON object
    pub metadata: Option<Value>,
}

/// Add Tracking Entry Handler
///
/// Records a carrier or staff note. The order's status is unchanged.
#[endpoint(
    tags("tracking"),
    summary = "Add Tracking Entry",
    security(("bearer_auth" = [])),
    status_codes(201, 400, 403, 404)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<AddTrackingEntryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TrackingEntryResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let entry = state
        .app
        .tracking
        .add_manual_entry(
            principal,
            order.into_inner().into(),
            ManualEntry {
                message: request.message,
                location: request.location,
                metadata: request.metadata,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(entry.into()))
}
