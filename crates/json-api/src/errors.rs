//! Error payloads for business-rule rejections.
//!
//! Plain failures render as [`StatusError`]; rejections the client can act on carry a
//! camelCase [`ErrorPayload`] with a stable `errorCode`.

use salvo::{
    http::StatusCode,
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cart line that could not be fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShortfallItem {
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

/// Body of a business-rule rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorPayload {
    /// Stable, machine-readable code, e.g. `INSUFFICIENT_STOCK`.
    pub error_code: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ShortfallItem>>,

    /// Offending input fields, e.g. missing address parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Units left, for stock rejections on a single line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
}

impl ErrorPayload {
    pub(crate) fn new(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            items: None,
            fields: None,
            available: None,
        }
    }

    #[must_use]
    pub(crate) fn with_items(mut self, items: Vec<ShortfallItem>) -> Self {
        self.items = Some(items);
        self
    }

    #[must_use]
    pub(crate) fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub(crate) fn with_available(mut self, available: u32) -> Self {
        self.available = Some(available);
        self
    }
}

/// Handler error: either a plain status or a coded rejection.
#[derive(Debug)]
pub(crate) enum ApiError {
    Status(StatusError),
    Rejected {
        status: StatusCode,
        payload: ErrorPayload,
    },
}

impl ApiError {
    pub(crate) fn bad_request(payload: ErrorPayload) -> Self {
        Self::Rejected {
            status: StatusCode::BAD_REQUEST,
            payload,
        }
    }

    pub(crate) fn conflict(payload: ErrorPayload) -> Self {
        Self::Rejected {
            status: StatusCode::CONFLICT,
            payload,
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match self {
            Self::Status(error) => res.render(error),
            Self::Rejected { status, payload } => {
                res.status_code(status);
                res.render(Json(payload));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn reject() -> Result<&'static str, ApiError> {
        Err(ApiError::bad_request(
            ErrorPayload::new("INVALID_ADDRESS", "Address is incomplete")
                .with_fields(vec!["postal_code".to_string()]),
        ))
    }

    #[handler]
    async fn not_found() -> Result<&'static str, ApiError> {
        Err(StatusError::not_found().into())
    }

    #[tokio::test]
    async fn rejection_renders_camel_case_payload() -> TestResult {
        let service = Service::new(Router::new().get(reject));

        let mut res = TestClient::get("http://example.com").send(&service).await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({
                "errorCode": "INVALID_ADDRESS",
                "message": "Address is incomplete",
                "fields": ["postal_code"],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn plain_status_passes_through() {
        let service = Service::new(Router::new().get(not_found));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
