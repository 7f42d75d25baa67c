//! Server configuration

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string; `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    /// Global request budget per second; 0 turns the limiter off.
    pub rate_limit_rps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_address: "0.0.0.0:8080".to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let rate_limit_rps = match lookup("RATE_LIMIT_RPS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Ignoring unparsable RATE_LIMIT_RPS");
                defaults.rate_limit_rps
            }),
            None => defaults.rate_limit_rps,
        };

        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.rate_limit_rps, 100);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db/patients"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("RATE_LIMIT_RPS", "0"),
        ]));
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://u:p@db/patients")
        );
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.rate_limit_rps, 0);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "  "),
            ("RATE_LIMIT_RPS", "lots"),
        ]));
        assert_eq!(config.database_url, None);
        assert_eq!(config.rate_limit_rps, 100);
    }
}
