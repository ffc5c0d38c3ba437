//! Auth Config

use clap::Args;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 secret bearer tokens are signed with
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Accept an `X-User-Id` header in place of a bearer token. Never enable in production.
    #[arg(long, env = "DIRECT_LOGIN_ENABLED", default_value_t = false)]
    pub direct_login_enabled: bool,
}
