use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:5000/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        search_url: get_env_or_default("SEARCH_URL", DEFAULT_SEARCH_URL),
        timeout: Duration::from_secs(get_env_parsed_or("SEARCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute URL of the backend `/search` endpoint.
    pub search_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(search_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            search_url: search_url.into(),
            timeout,
        }
    }

    /// Copy of the global config with command line overrides applied.
    pub fn with_overrides(&self, search_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            search_url: search_url.unwrap_or_else(|| self.search_url.clone()),
            timeout: timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(self.timeout),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed_or(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable value, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

#[test]
fn test_with_overrides() {
    let base = Config::new(DEFAULT_SEARCH_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

    let untouched = base.with_overrides(None, None);
    assert_eq!(untouched.search_url, DEFAULT_SEARCH_URL);
    assert_eq!(untouched.timeout, Duration::from_secs(30));

    let overridden = base.with_overrides(Some("http://search.local/search".into()), Some(5));
    assert_eq!(overridden.search_url, "http://search.local/search");
    assert_eq!(overridden.timeout, Duration::from_secs(5));
}
