//! Auth service.

use std::fmt;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{AuthServiceError, Claims, Principal, repository::PgAuthRepository},
    domain::profiles::records::ProfileUuid,
};

/// Verifies HS256 bearer tokens and resolves the caller's profile.
#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAuthService")
            .field("repository", &self.repository)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, jwt_secret: &[u8]) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let claims = decode::<Claims>(bearer_token, &self.decoding_key, &self.validation)?.claims;

        self.authenticate_direct(ProfileUuid::from_uuid(claims.sub))
            .await
    }

    async fn authenticate_direct(&self, user: ProfileUuid) -> Result<Principal, AuthServiceError> {
        self.repository
            .find_principal(user)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate a bearer token and load the profile it names.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;

    /// Load a profile without a token; only reachable when direct login is enabled.
    async fn authenticate_direct(&self, user: ProfileUuid) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{domain::profiles::records::Role, test::TestContext};

    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn token_for(sub: Uuid, exp_offset_secs: i64, secret: &[u8]) -> TestResult<String> {
        let now = Timestamp::now().as_second();
        let exp = u64::try_from(now + exp_offset_secs)?;

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &Claims { sub, exp },
            &EncodingKey::from_secret(secret),
        )?)
    }

    #[tokio::test]
    async fn valid_token_resolves_profile_role() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile("seller@example.com", Role::Seller).await;
        let service = PgAuthService::new(ctx.db.pool().clone(), SECRET);

        let principal = service
            .authenticate_bearer(&token_for(seller.into_uuid(), 3_600, SECRET)?)
            .await?;

        assert_eq!(principal.user_uuid, seller);
        assert_eq!(principal.role, Role::Seller);

        Ok(())
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = PgAuthService::new(ctx.db.pool().clone(), SECRET);

        let result = service
            .authenticate_bearer(&token_for(ctx.user_uuid.into_uuid(), 3_600, b"other")?)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Token(_))),
            "expected Token error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = PgAuthService::new(ctx.db.pool().clone(), SECRET);

        let result = service
            .authenticate_bearer(&token_for(ctx.user_uuid.into_uuid(), -3_600, SECRET)?)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Token(_))),
            "expected Token error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn token_for_unknown_profile_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let service = PgAuthService::new(ctx.db.pool().clone(), SECRET);

        let result = service
            .authenticate_bearer(&token_for(Uuid::now_v7(), 3_600, SECRET)?)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
