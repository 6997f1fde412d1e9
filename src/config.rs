use std::time::Duration;

use anyhow::Context;
use clap::Args;

use crate::source::FallbackPolicy;

// Runtime settings shared by every view. Flags win over environment.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Base URL of the SentinelX backend
    #[arg(
        long,
        global = true,
        env = "SENTINELX_BACKEND_URL",
        default_value = "http://localhost:8000"
    )]
    pub backend_url: String,

    /// Per-request timeout in milliseconds
    #[arg(
        long,
        global = true,
        env = "SENTINELX_TIMEOUT_MS",
        default_value_t = 3000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Refresh interval in milliseconds for --watch and the live feed
    #[arg(
        long,
        global = true,
        env = "SENTINELX_INTERVAL_MS",
        default_value_t = 5000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Report backend failures instead of substituting fallback data
    #[arg(long, global = true, env = "SENTINELX_NO_FALLBACK")]
    pub no_fallback: bool,

    /// Log level for this crate, ignored when RUST_LOG is set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            timeout_ms: 3000,
            interval_ms: 5000,
            no_fallback: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy {
            use_fallback_on_error: !self.no_fallback,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }

    pub fn snapshot_url(&self, file_name: &str) -> String {
        self.endpoint(&format!("/snapshot/{file_name}"))
    }

    // The backend is a local service; system proxies only get in the way.
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .no_proxy()
            .build()
            .context("failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_contract() {
        let settings = Settings::default();
        assert_eq!(settings.request_timeout(), Duration::from_millis(3000));
        assert_eq!(settings.poll_interval(), Duration::from_millis(5000));
        assert!(settings.fallback_policy().use_fallback_on_error);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let settings = Settings {
            backend_url: "http://sentinel.local:8000/".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.endpoint("/alerts"), "http://sentinel.local:8000/alerts");
        assert_eq!(
            settings.snapshot_url("snapshot_17.jpg"),
            "http://sentinel.local:8000/snapshot/snapshot_17.jpg"
        );
    }

    #[test]
    fn no_fallback_disables_masking() {
        let settings = Settings {
            no_fallback: true,
            ..Settings::default()
        };
        assert!(!settings.fallback_policy().use_fallback_on_error);
    }
}
