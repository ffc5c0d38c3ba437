use attar_app::domain::profiles::{
    PgProfilesService, ProfilesService,
    data::NewProfile,
    records::{ProfileUuid, Role},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// Login email address
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    full_name: Option<String>,

    /// One of `customer`, `seller` or `admin`
    #[arg(long, default_value = "customer")]
    role: Role,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional profile UUID, e.g. the identity provider's user id; generated when omitted
    #[arg(long)]
    profile_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let profile = PgProfilesService::new(db)
        .create_profile(NewProfile {
            uuid: args
                .profile_uuid
                .map_or_else(ProfileUuid::new, ProfileUuid::from_uuid),
            email: args.email,
            full_name: args.full_name,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("email: {}", profile.email);
    println!("role: {}", profile.role);

    Ok(())
}
