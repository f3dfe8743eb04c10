//! Listener and CORS settings, read from the `http` section of `oaas.json`
//!
//! `validate` runs at config load, so a bad address or origin stops boot
//! instead of surfacing as blocked browser requests later.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tower_http::cors::AllowOrigin;

use crate::observability::Logger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// IP address to bind
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl HttpServerConfig {
    /// Checks the bind address and every CORS origin.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be > 0".to_string());
        }
        self.bind_addr()?;
        for origin in &self.cors_origins {
            parse_origin(origin)?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid bind address '{}:{}': {}", self.host, self.port, e))
    }

    /// CORS policy for the router.
    ///
    /// Origins that fail to parse are logged and left out; `validate`
    /// rejects them before a configured server gets this far.
    pub fn allowed_origins(&self) -> AllowOrigin {
        if self.cors_origins.is_empty() {
            return AllowOrigin::any();
        }

        let mut origins = Vec::with_capacity(self.cors_origins.len());
        for origin in &self.cors_origins {
            match parse_origin(origin) {
                Ok(value) => origins.push(value),
                Err(reason) => Logger::warn("CORS_ORIGIN_IGNORED", &[("reason", &reason)]),
            }
        }
        AllowOrigin::list(origins)
    }
}

/// An origin is `scheme://host[:port]` with an http(s) scheme and no path.
fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| format!("cors origin '{}' must start with http:// or https://", origin))?;

    if rest.is_empty() || rest.contains('/') {
        return Err(format!("cors origin '{}' must be scheme://host[:port]", origin));
    }

    HeaderValue::from_str(origin).map_err(|e| format!("cors origin '{}': {}", origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HttpServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_hostname_is_not_a_bind_address() {
        let config = HttpServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("invalid bind address"));
    }

    #[test]
    fn test_bad_origins_rejected() {
        for origin in ["localhost:3000", "http://", "http://example.com/app", "http://bad\nhost"] {
            let config = HttpServerConfig {
                cors_origins: vec![origin.to_string()],
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{:?}", origin);
        }
    }

    #[test]
    fn test_origin_with_port_accepted() {
        assert!(parse_origin("https://app.example.com:8443").is_ok());
    }
}
