use std::net::SocketAddr;
use std::path::PathBuf;

/// Public Overpass interpreter used when `NOOR_OVERPASS_URL` is unset.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Overpass request budget in seconds when `NOOR_OVERPASS_TIMEOUT_SECS` is unset.
pub const DEFAULT_OVERPASS_TIMEOUT_SECS: u64 = 15;

#[derive(Clone)]
pub struct AppConfig {
    /// `None` runs the service against the built-in verified places only.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub places_path: PathBuf,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub overpass_url: String,
    pub overpass_timeout_secs: u64,
    pub overpass_user_agent: String,
    pub overpass_max_elements: u32,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("places_path", &self.places_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("overpass_url", &self.overpass_url)
            .field("overpass_timeout_secs", &self.overpass_timeout_secs)
            .field("overpass_user_agent", &self.overpass_user_agent)
            .field("overpass_max_elements", &self.overpass_max_elements)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
