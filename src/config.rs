// src/config.rs
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;
use governor::Quota;

#[derive(Clone, Debug)]
pub struct Config {
    // Cache
    pub cache_ttl_secs: u64,
    pub cache_check_period_secs: u64,

    // Probe timeouts
    pub minecraft_timeout_ms: u64,
    pub http_timeout_ms: u64,

    pub debug: bool,

    // HTTP front end
    pub bind_address: String,
    pub port: u16,
    pub status_period_secs: u64,
    pub status_burst_limit: u32,
    pub batch_period_secs: u64,
    pub batch_burst_limit: u32,

    // Watchers, as `game@host[:port]` entries
    pub watch_servers: Vec<String>,
    pub watch_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            cache_check_period_secs: 320,
            minecraft_timeout_ms: 5000,
            http_timeout_ms: 3000,
            debug: false,
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            status_period_secs: 1,
            status_burst_limit: 30,
            batch_period_secs: 5,
            batch_burst_limit: 5,
            watch_servers: Vec::new(),
            watch_interval_secs: 60,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn quota(period_secs: u64, burst: u32) -> Quota {
    let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
    Quota::with_period(Duration::from_secs(period_secs.max(1)))
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: env_or("CACHE_TTL_SECS", defaults.cache_ttl_secs),
            cache_check_period_secs: env_or("CACHE_CHECK_PERIOD_SECS", defaults.cache_check_period_secs),

            minecraft_timeout_ms: env_or("MINECRAFT_TIMEOUT_MS", defaults.minecraft_timeout_ms),
            http_timeout_ms: env_or("HTTP_TIMEOUT_MS", defaults.http_timeout_ms),

            debug: env::var("DEBUG").map(|v| v == "true").unwrap_or(defaults.debug),

            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: env_or("PORT", defaults.port),
            status_period_secs: env_or("STATUS_PERIOD_SECS", defaults.status_period_secs),
            status_burst_limit: env_or("STATUS_BURST_LIMIT", defaults.status_burst_limit),
            batch_period_secs: env_or("BATCH_PERIOD_SECS", defaults.batch_period_secs),
            batch_burst_limit: env_or("BATCH_BURST_LIMIT", defaults.batch_burst_limit),

            watch_servers: env::var("WATCH_SERVERS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|entry| !entry.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(defaults.watch_servers),
            watch_interval_secs: env_or("WATCH_INTERVAL_SECS", defaults.watch_interval_secs),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_check_period(&self) -> Duration {
        Duration::from_secs(self.cache_check_period_secs.max(1))
    }

    pub fn minecraft_timeout(&self) -> Duration {
        Duration::from_millis(self.minecraft_timeout_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch_interval_secs.max(1))
    }

    /// Log filter applied when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    pub fn status_quota(&self) -> Quota {
        quota(self.status_period_secs, self.status_burst_limit)
    }

    pub fn batch_quota(&self) -> Quota {
        quota(self.batch_period_secs, self.batch_burst_limit)
    }
}
