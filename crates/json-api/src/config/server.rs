//! Server Config

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Scheme and authority clients use to reach this server
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:8698")]
    pub public_base_url: String,

    /// Path prefix product images are served under
    #[arg(long, env = "MEDIA_URL", default_value = "/media/")]
    pub media_url: String,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
