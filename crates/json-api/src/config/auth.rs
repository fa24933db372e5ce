//! Auth Config

use clap::Args;

/// Session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a login session stays valid
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub session_ttl_hours: u32,
}
