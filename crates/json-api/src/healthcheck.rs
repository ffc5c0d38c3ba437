//! Healthcheck Handler

use std::sync::Arc;

use attar_app::health::HealthServiceError;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the service can take traffic, otherwise `unavailable`
    pub status: String,

    /// Outcome of the database round-trip
    pub database: String,
}

impl HealthResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            database: "ok".to_string(),
        }
    }

    fn unavailable() -> Self {
        Self {
            status: "unavailable".to_string(),
            database: "unavailable".to_string(),
        }
    }
}

/// Healthcheck handler
///
/// Responds 200 when a pooled connection answers a query, 503 when the pool is
/// exhausted or the database cannot be reached.
#[endpoint(tags("health"), summary = "Health check endpoint", status_codes(200, 503))]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.health.check_database().await {
        Ok(()) => Ok(Json(HealthResponse::ok())),
        Err(HealthServiceError::Unavailable) => {
            warn!("healthcheck: no pooled connection available");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            Ok(Json(HealthResponse::unavailable()))
        }
        Err(HealthServiceError::Sql(source)) => {
            error!("healthcheck: database query failed: {source}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            Ok(Json(HealthResponse::unavailable()))
        }
    }
}

#[cfg(test)]
mod tests {
    use attar_app::health::MockHealthService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TestState;

    use super::*;

    fn service(health: MockHealthService) -> Service {
        TestState::default()
            .with_health(health)
            .anonymous_service(Router::with_path("healthcheck").get(handler))
    }

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let mut health = MockHealthService::new();

        health
            .expect_check_database()
            .once()
            .return_once(|| Ok(()));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service(health))
            .await;

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response.status, "ok");
        assert_eq!(response.database, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_pool_returns_503() -> TestResult {
        let mut health = MockHealthService::new();

        health
            .expect_check_database()
            .once()
            .return_once(|| Err(HealthServiceError::Unavailable));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&service(health))
            .await;

        let response: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(response.status, "unavailable");

        Ok(())
    }
}
