use std::time::Duration;

use attar_app::{
    auth::Claims,
    domain::profiles::{PgProfilesService, ProfilesService, records::ProfileUuid},
};
use clap::Args;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// Profile the token is issued for
    #[arg(long)]
    profile_uuid: Uuid,

    /// Token lifetime in hours
    #[arg(long, default_value_t = 24)]
    ttl_hours: u64,

    /// HS256 signing secret shared with the API server
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    if args.jwt_secret.is_empty() {
        return Err("jwt_secret cannot be empty".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;

    let profile = PgProfilesService::new(db)
        .get_profile(ProfileUuid::from_uuid(args.profile_uuid))
        .await
        .map_err(|error| format!("failed to load profile: {error}"))?;

    let now = u64::try_from(Timestamp::now().as_second())
        .map_err(|error| format!("system clock is before the epoch: {error}"))?;

    let ttl = Duration::from_secs(args.ttl_hours.saturating_mul(3_600));

    let token = encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: profile.uuid.into_uuid(),
            exp: now.saturating_add(ttl.as_secs()),
        },
        &EncodingKey::from_secret(args.jwt_secret.as_bytes()),
    )
    .map_err(|error| format!("failed to sign token: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("role: {}", profile.role);
    println!("token: {token}");

    Ok(())
}
