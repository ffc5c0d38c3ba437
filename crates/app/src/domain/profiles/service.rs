//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::profiles::{
        data::NewProfile,
        errors::ProfilesServiceError,
        records::{ProfileRecord, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        if profile.email.trim().is_empty() {
            return Err(ProfilesServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(
        &self,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Creates a profile with the given role.
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Retrieve a single profile.
    async fn get_profile(
        &self,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::profiles::records::Role, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_profile_persists_role() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProfileUuid::new();

        let profile = ctx
            .profiles
            .create_profile(NewProfile {
                uuid,
                email: "admin@example.com".to_string(),
                full_name: Some("Store Admin".to_string()),
                role: Role::Admin,
            })
            .await?;

        assert_eq!(profile.uuid, uuid);
        assert_eq!(profile.role, Role::Admin);

        let fetched = ctx.profiles.get_profile(uuid).await?;

        assert_eq!(fetched.email, "admin@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let new_profile = |email: &str| NewProfile {
            uuid: ProfileUuid::new(),
            email: email.to_string(),
            full_name: None,
            role: Role::Customer,
        };

        ctx.profiles
            .create_profile(new_profile("dup@example.com"))
            .await?;

        let result = ctx
            .profiles
            .create_profile(new_profile("DUP@example.com"))
            .await;

        assert!(
            matches!(result, Err(ProfilesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_profile_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.profiles.get_profile(ProfileUuid::new()).await;

        assert!(
            matches!(result, Err(ProfilesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
