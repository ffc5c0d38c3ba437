//! Auth middleware.
//!
//! Resolves the caller from a bearer token and stores their `Principal` in the depot.
//! With direct login enabled, an `X-User-Id` header is accepted instead of a token.

use std::sync::Arc;

use attar_app::{
    auth::AuthServiceError,
    domain::profiles::records::ProfileUuid,
};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, info};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const DIRECT_LOGIN_HEADER: &str = "x-user-id";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let result = match (extract_bearer_token(req), direct_login_user(req, &state)) {
        (Some(token), _) => state.app.auth.authenticate_bearer(token).await,
        (None, Some(user)) => state.app.auth.authenticate_direct(user).await,
        (None, None) => {
            res.render(
                StatusError::unauthorized().brief("Missing or invalid Authorization header"),
            );

            return;
        }
    };

    match result {
        Ok(principal) => {
            depot.insert_principal(principal);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => res.render(into_status_error(error)),
    }
}

fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Unknown user"),
        AuthServiceError::Token(source) => {
            info!("rejected bearer token: {source}");

            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Sql(source) => {
            error!("failed to load principal: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

fn direct_login_user(req: &Request, state: &State) -> Option<ProfileUuid> {
    if !state.direct_login_enabled {
        return None;
    }

    let value = req.headers().get(DIRECT_LOGIN_HEADER)?.to_str().ok()?;

    Uuid::parse_str(value.trim())
        .ok()
        .map(ProfileUuid::from_uuid)
}
