use std::{net::SocketAddr, path::PathBuf, time::Duration};

use manifest::stack::{BACKEND_PORT, BACKEND_SERVICE, GATEWAY_CONTAINER_PORT};
use url::Url;

use crate::server::{
    error::{config::ConfigError, AppError},
    util::parse::parse_size,
};

const DEFAULT_STATIC_DIR: &str = "/staticfiles";
const DEFAULT_MEDIA_DIR: &str = "/media";
const DEFAULT_DOCS_ROOT: &str = "/usr/share/nginx/html";
const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;
const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 60;

/// Gateway settings.
///
/// Every field has a default matching the container layout of the Foodgram stack, so an
/// empty environment yields a working configuration inside the gateway container. Tests
/// build it with `Config::from_lookup(|_| None)` and override fields directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the application server inside the container network.
    pub backend_url: Url,
    /// Mount point of the `static` volume.
    pub static_dir: PathBuf,
    /// Mount point of the `media` volume.
    pub media_dir: PathBuf,
    /// Document root under which `api/docs/` is mounted.
    pub docs_root: PathBuf,
    pub max_body_size: usize,
    /// Limit for connecting to the backend and for each silence while reading from it.
    pub proxy_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset variables keep their defaults; set but malformed variables are rejected.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Defaults overridden by every variable that was set
    /// - `Err(AppError::ConfigErr)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("GATEWAY_BACKEND_URL")
            .unwrap_or_else(|| format!("http://{}:{}", BACKEND_SERVICE, BACKEND_PORT));
        let backend_url =
            Url::parse(&backend).map_err(|e| invalid("GATEWAY_BACKEND_URL", &backend, e))?;
        if backend_url.cannot_be_a_base() {
            return Err(invalid("GATEWAY_BACKEND_URL", &backend, "not a base URL").into());
        }

        let mut config = Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], GATEWAY_CONTAINER_PORT)),
            backend_url,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            docs_root: PathBuf::from(DEFAULT_DOCS_ROOT),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            proxy_timeout: Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS),
        };

        if let Some(value) = lookup("GATEWAY_LISTEN_ADDR") {
            config.listen_addr = value
                .parse()
                .map_err(|e| invalid("GATEWAY_LISTEN_ADDR", &value, e))?;
        }
        if let Some(value) = lookup("GATEWAY_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("GATEWAY_MEDIA_DIR") {
            config.media_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("GATEWAY_DOCS_ROOT") {
            config.docs_root = PathBuf::from(value);
        }
        if let Some(value) = lookup("GATEWAY_MAX_BODY_SIZE") {
            config.max_body_size =
                parse_size(&value).map_err(|e| invalid("GATEWAY_MAX_BODY_SIZE", &value, e))?;
        }
        if let Some(value) = lookup("GATEWAY_PROXY_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .map_err(|e| invalid("GATEWAY_PROXY_TIMEOUT_SECS", &value, e))?;
            config.proxy_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn invalid(name: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    /// Tests an empty environment yields the container defaults.
    #[test]
    fn defaults_match_container_layout() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:80");
        assert_eq!(config.backend_url.as_str(), "http://backend:10000/");
        assert_eq!(config.static_dir, PathBuf::from("/staticfiles"));
        assert_eq!(config.media_dir, PathBuf::from("/media"));
        assert_eq!(config.docs_root, PathBuf::from("/usr/share/nginx/html"));
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert_eq!(config.proxy_timeout, Duration::from_secs(60));
    }

    /// Tests set variables override defaults.
    #[test]
    fn overrides_from_environment() {
        let config = Config::from_lookup(lookup(&[
            ("GATEWAY_LISTEN_ADDR", "127.0.0.1:8080"),
            ("GATEWAY_BACKEND_URL", "http://127.0.0.1:9000"),
            ("GATEWAY_MAX_BODY_SIZE", "1k"),
            ("GATEWAY_PROXY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.backend_url.port(), Some(9000));
        assert_eq!(config.max_body_size, 1024);
        assert_eq!(config.proxy_timeout, Duration::from_secs(5));
    }

    /// Tests malformed values name the offending variable.
    #[test]
    fn rejects_malformed_values() {
        let err = Config::from_lookup(lookup(&[("GATEWAY_MAX_BODY_SIZE", "big")])).unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigErr(ConfigError::InvalidEnvVar { ref name, .. })
                if name == "GATEWAY_MAX_BODY_SIZE"
        ));

        let err = Config::from_lookup(lookup(&[("GATEWAY_BACKEND_URL", "mailto:a@b")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigErr(_)));

        let err = Config::from_lookup(lookup(&[("GATEWAY_LISTEN_ADDR", "nowhere")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigErr(_)));
    }
}
