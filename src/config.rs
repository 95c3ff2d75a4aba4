use std::env;
use std::path::PathBuf;

use crate::render::DEFAULT_TITLE;
use crate::schedule::DEFAULT_FREE_PERIOD_NAME;

/// Server and generation settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Prefills the form and fills in requests that send no title
    pub default_title: String,
    /// Used when a request does not send a free period name at all
    pub default_free_period_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
            default_title: DEFAULT_TITLE.to_string(),
            default_free_period_name: DEFAULT_FREE_PERIOD_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// `HOST`, `PORT`, `STATIC_DIR`, `SCHEDULE_TITLE`, `FREE_PERIOD_NAME`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            default_title: lookup("SCHEDULE_TITLE").unwrap_or(defaults.default_title),
            default_free_period_name: lookup("FREE_PERIOD_NAME")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.default_free_period_name),
        }
    }
}
