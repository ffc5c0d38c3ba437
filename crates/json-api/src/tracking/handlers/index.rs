//! Order Timeline Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use attar_app::domain::orders::records::OrderAccess;

use crate::{
    extensions::*,
    state::State,
    tracking::{errors::into_status_error, responses::TrackingEntryResponse},
};

/// Order Timeline Handler
///
/// Entries are returned oldest first.
#[endpoint(
    tags("tracking"),
    summary = "Get Order Timeline",
    security(("bearer_auth" = [])),
    status_codes(200, 404)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<TrackingEntryResponse>>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let entries = state
        .app
        .tracking
        .get_timeline(OrderAccess::from(principal), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use attar_app::domain::{
        orders::{records::OrderUuid, status::OrderStatus},
        tracking::{MockTrackingService, TrackingServiceError},
    };

    use crate::{
        test_helpers::{ADMIN, CUSTOMER, TEST_USER_UUID, TestState},
        tracking::responses::fixtures::make_entry,
    };

    use super::*;

    fn make_service(tracking: MockTrackingService, principal: attar_app::auth::Principal) -> Service {
        TestState::default().with_tracking(tracking).service(
            principal,
            Router::with_path("orders/{order}/tracking").get(handler),
        )
    }

    #[tokio::test]
    async fn test_customer_reads_own_timeline() -> TestResult {
        let order = OrderUuid::new();
        let mut tracking = MockTrackingService::new();

        tracking
            .expect_get_timeline()
            .once()
            .withf(move |access, o| *access == OrderAccess::Owner(TEST_USER_UUID) && *o == order)
            .return_once(move |_, _| {
                Ok(vec![
                    make_entry(order, OrderStatus::Pending),
                    make_entry(order, OrderStatus::Confirmed),
                ])
            });

        let mut res = TestClient::get(format!("http://example.com/orders/{order}/tracking"))
            .send(&make_service(tracking, CUSTOMER))
            .await;

        let body: Vec<TrackingEntryResponse> = res.take_json().await?;
        let statuses: Vec<_> = body.iter().map(|entry| entry.status.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(statuses, ["pending", "confirmed"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_staff_read_any_timeline() -> TestResult {
        let mut tracking = MockTrackingService::new();

        tracking
            .expect_get_timeline()
            .once()
            .withf(|access, _| *access == OrderAccess::Staff)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get(format!("http://example.com/orders/{}/tracking", OrderUuid::new()))
            .send(&make_service(tracking, ADMIN))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut tracking = MockTrackingService::new();

        tracking
            .expect_get_timeline()
            .once()
            .return_once(|_, _| Err(TrackingServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}/tracking", OrderUuid::new()))
            .send(&make_service(tracking, CUSTOMER))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
