//! Server configuration from environment variables
//!
//! | Variable             | Default                            |
//! |----------------------|------------------------------------|
//! | `PORT`               | 3000                               |
//! | `DATA_DIR`           | `data` (holds `selection.json`)    |
//! | `RECOMMENDATION_URL` | `http://localhost:8000/recommend`  |
//! | `CACHE_TTL_SECS`     | 300                                |
//!
//! An empty `RECOMMENDATION_URL` disables the remote call.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RECOMMENDATION_URL: &str = "http://localhost:8000/recommend";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const STORE_FILE_NAME: &str = "selection.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub recommendation_url: Option<String>,
    pub cache_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            recommendation_url: Some(DEFAULT_RECOMMENDATION_URL.to_string()),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let recommendation_url = match lookup("RECOMMENDATION_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url.trim().to_string()),
            None => defaults.recommendation_url,
        };

        let cache_ttl_secs = lookup("CACHE_TTL_SECS")
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(defaults.cache_ttl_secs);

        Self {
            port,
            data_dir,
            recommendation_url,
            cache_ttl_secs,
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.store_path(), PathBuf::from("data/selection.json"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/plantpal"),
            ("RECOMMENDATION_URL", "http://recs.internal/api"),
            ("CACHE_TTL_SECS", "60"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/plantpal/selection.json"));
        assert_eq!(config.recommendation_url.as_deref(), Some("http://recs.internal/api"));
        assert_eq!(config.cache_ttl_secs, 60);
    }

    #[test]
    fn test_empty_url_disables_remote() {
        let config = ServerConfig::from_lookup(lookup_from(&[("RECOMMENDATION_URL", " ")]));
        assert_eq!(config.recommendation_url, None);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
