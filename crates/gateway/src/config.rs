//! Gateway configuration loaded from environment variables.

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `4000`)
/// - `ACCOUNT_ADDR`: account service address (default: `"localhost:50051"`)
/// - `COLLECT_ADDR`: collecting service address (default: `"localhost:50052"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
///
/// Backend addresses without a scheme are reached over plain `http://`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub account_addr: String,
    pub collect_addr: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            account_addr: std::env::var("ACCOUNT_ADDR")
                .map(|addr| base_url(&addr))
                .unwrap_or(defaults.account_addr),
            collect_addr: std::env::var("COLLECT_ADDR")
                .map(|addr| base_url(&addr))
                .unwrap_or(defaults.collect_addr),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            account_addr: base_url("localhost:50051"),
            collect_addr: base_url("localhost:50052"),
            log_level: "info".to_string(),
        }
    }
}

/// Turns `host:port` into `http://host:port`, leaving explicit schemes alone.
pub fn base_url(addr: &str) -> String {
    let addr = addr.trim().trim_end_matches('/');
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}
