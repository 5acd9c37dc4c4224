//! Admin Config

use clap::Args;

/// Admin access settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Bearer token for catalog writes, order listings and payment status updates
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: String,
}
