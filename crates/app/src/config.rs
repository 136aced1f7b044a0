//! Application configuration loaded from environment variables.

use domain::DEFAULT_CLASSIFY_CONCURRENCY;

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DATABASE_URL` — PostgreSQL connection string; in-memory store when unset
/// - `CLASSIFY_CONCURRENCY` — cap on concurrent classification tasks
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub classify_concurrency: usize,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            classify_concurrency: std::env::var("CLASSIFY_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CLASSIFY_CONCURRENCY),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            classify_concurrency: DEFAULT_CLASSIFY_CONCURRENCY,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.database_url.is_none());
        assert_eq!(config.classify_concurrency, DEFAULT_CLASSIFY_CONCURRENCY);
        assert_eq!(config.log_level, "info");
    }
}
