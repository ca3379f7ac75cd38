//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the hola service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HolaConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Greeting template and host identity.
    pub greeting: GreetingConfig,

    /// Downstream (aloha) service settings.
    pub downstream: DownstreamConfig,

    /// Distributed tracing settings.
    pub tracing: TracingConfig,

    /// Authentication settings for the secured endpoint.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time budget for an inbound request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Greeting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Greeting template with a `{hostname}` placeholder.
    pub template: String,

    /// Host identifier substituted into the template.
    ///
    /// None means "take HOSTNAME from the environment at startup,
    /// default to `unknown`".
    pub hostname: Option<String>,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            template: "Hola de {hostname}".to_string(),
            hostname: None,
        }
    }
}

/// Downstream (aloha) service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Explicit base URL of the downstream service. Wins over host/port.
    pub url: Option<String>,

    /// Downstream host, composed with `port` as `http://{host}:{port}`.
    pub host: Option<String>,

    /// Downstream port.
    pub port: Option<u16>,

    /// Hard timeout for the whole downstream call in milliseconds.
    pub timeout_ms: u64,

    /// Staleness window for re-reading endpoint settings from the
    /// environment, in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: None,
            timeout_ms: 500,
            cache_ttl_ms: 5_000,
        }
    }
}

/// Distributed tracing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Enable trace context extraction/propagation. When disabled the
    /// no-op tracer is wired in and no trace headers are emitted.
    pub enabled: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A named bearer principal accepted on the secured endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPrincipal {
    /// Principal name reported back to the caller.
    pub name: String,

    /// Bearer token identifying this principal.
    pub token: String,
}

/// Authentication configuration for `/hola-secured`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accept an upstream-established identity from the X-Forwarded-User
    /// header. Only enable behind an authenticating gateway.
    pub trust_forwarded_user: bool,

    /// Bearer principals accepted directly by this service.
    #[serde(default)]
    pub principals: Vec<ApiPrincipal>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            trust_forwarded_user: true,
            principals: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = HolaConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.downstream.timeout_ms, 500);
        assert_eq!(config.downstream.cache_ttl_ms, 5_000);
        assert!(config.greeting.template.contains("{hostname}"));
        assert!(config.tracing.enabled);
    }

    #[test]
    fn minimal_toml_deserializes() {
        let config: HolaConfig = toml::from_str(
            r#"
            [downstream]
            host = "aloha.svc"
            port = 8080
            timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.downstream.host.as_deref(), Some("aloha.svc"));
        assert_eq!(config.downstream.port, Some(8080));
        assert_eq!(config.downstream.timeout_ms, 250);
        // untouched sections fall back to defaults
        assert_eq!(config.observability.log_level, "info");
    }
}
