//! Set Default Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    addresses::{errors::into_status_error, responses::AddressResponse},
    extensions::*,
    state::State,
};

/// Set Default Address Handler
///
/// Demotes the previous default of the same kind.
#[endpoint(
    tags("addresses"),
    summary = "Set Default Address",
    security(("bearer_auth" = [])),
    status_codes(200, 404, 409)
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let principal = depot.principal_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let address = state
        .app
        .addresses
        .set_default(principal.user_uuid, address.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use attar_app::domain::addresses::{
        AddressesServiceError, MockAddressesService, records::AddressUuid,
    };

    use crate::{
        addresses::responses::fixtures::make_address,
        test_helpers::{CUSTOMER, TEST_USER_UUID, TestState},
    };

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        TestState::default().with_addresses(addresses).service(
            CUSTOMER,
            Router::with_path("addresses/{address}/default").put(handler),
        )
    }

    #[tokio::test]
    async fn test_set_default_returns_200() -> TestResult {
        let uuid = AddressUuid::new();
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_set_default()
            .once()
            .withf(move |user, address| *user == TEST_USER_UUID && *address == uuid)
            .return_once(move |_, _| Ok(make_address(uuid, true)));

        let res = TestClient::put(format!("http://example.com/addresses/{uuid}/default"))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_default_returns_409() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_set_default()
            .once()
            .return_once(|_, _| Err(AddressesServiceError::DuplicateDefault));

        let res = TestClient::put(format!(
            "http://example.com/addresses/{}/default",
            AddressUuid::new()
        ))
        .send(&make_service(addresses))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
