//! Server settings read from the environment.
//!
//! | Variable             | Default         |
//! |----------------------|-----------------|
//! | `FORMS_HOST`         | `127.0.0.1`     |
//! | `FORMS_PORT`         | `8080`          |
//! | `FORMS_DATABASE`     | `forms.sqlite`  |
//! | `FORMS_OPEN_BROWSER` | `true`          |
//! | `FORMS_JSON_LIMIT`   | `10485760` (bytes) |
//!
//! Unparseable values are logged and replaced by the default.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub open_browser: bool,
    pub json_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: PathBuf::from("forms.sqlite"),
            open_browser: true,
            json_limit: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("FORMS_HOST").unwrap_or(defaults.host),
            port: parse_or("FORMS_PORT", lookup("FORMS_PORT"), defaults.port),
            database: lookup("FORMS_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            open_browser: parse_or(
                "FORMS_OPEN_BROWSER",
                lookup("FORMS_OPEN_BROWSER"),
                defaults.open_browser,
            ),
            json_limit: parse_or("FORMS_JSON_LIMIT", lookup("FORMS_JSON_LIMIT"), defaults.json_limit),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
        assert_eq!(ServerConfig::default().url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = config_from(&[
            ("FORMS_HOST", "0.0.0.0"),
            ("FORMS_PORT", "9000"),
            ("FORMS_DATABASE", "/tmp/reviews.sqlite"),
            ("FORMS_OPEN_BROWSER", "nope"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database, PathBuf::from("/tmp/reviews.sqlite"));
        assert!(config.open_browser);
    }
}
