use std::net::SocketAddr;

use crate::region::Region;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub overpass_url: String,
    pub overpass_timeout_secs: u64,
    pub user_agent: String,
    pub region: Region,
    pub refresh_on_startup: bool,
    /// Six-field cron expression (seconds first). `None` disables scheduled refreshes.
    pub refresh_cron: Option<String>,
    /// Refresh requests allowed per 60-second window.
    pub refresh_rate_limit: usize,
}
