//! Environment variable overlay.
//!
//! # Responsibilities
//! - Map the service's environment surface onto the config schema
//! - Keep the overlay a pure function so tests never mutate process env
//!
//! # Environment surface
//! - `HOSTNAME`       → greeting.hostname
//! - `HOLA_GREETING`  → greeting.template
//! - `ALOHA_URL`      → downstream.url (wins over host/port)
//! - `ALOHA_HOST`     → downstream.host
//! - `ALOHA_PORT`     → downstream.port (ignored if unparsable)

use crate::config::schema::{DownstreamConfig, HolaConfig};

pub const ENV_HOSTNAME: &str = "HOSTNAME";
pub const ENV_GREETING: &str = "HOLA_GREETING";
pub const ENV_ALOHA_URL: &str = "ALOHA_URL";
pub const ENV_ALOHA_HOST: &str = "ALOHA_HOST";
pub const ENV_ALOHA_PORT: &str = "ALOHA_PORT";

/// Apply environment variables from `vars` on top of `config`.
///
/// Later duplicate keys win, matching last-value-wins header semantics
/// elsewhere in the service.
pub fn apply_env<I>(mut config: HolaConfig, vars: I) -> HolaConfig
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        match key.as_str() {
            ENV_HOSTNAME => config.greeting.hostname = Some(value),
            ENV_GREETING => config.greeting.template = value,
            _ => apply_downstream_var(&mut config.downstream, &key, value),
        }
    }
    config
}

/// Apply a single downstream-related variable, if recognized.
pub fn apply_downstream_var(downstream: &mut DownstreamConfig, key: &str, value: String) {
    match key {
        ENV_ALOHA_URL => downstream.url = Some(value),
        ENV_ALOHA_HOST => downstream.host = Some(value),
        ENV_ALOHA_PORT => match value.parse::<u16>() {
            Ok(port) => downstream.port = Some(port),
            Err(_) => {
                tracing::warn!(value = %value, "Ignoring unparsable ALOHA_PORT");
            }
        },
        _ => {}
    }
}

/// Load the process environment on top of `config`.
pub fn from_env(config: HolaConfig) -> HolaConfig {
    apply_env(config, std::env::vars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn overlay_sets_greeting_and_downstream() {
        let config = apply_env(
            HolaConfig::default(),
            vars(&[
                ("HOSTNAME", "pod-42"),
                ("HOLA_GREETING", "Hey {hostname}"),
                ("ALOHA_HOST", "aloha.svc"),
                ("ALOHA_PORT", "9090"),
            ]),
        );
        assert_eq!(config.greeting.hostname.as_deref(), Some("pod-42"));
        assert_eq!(config.greeting.template, "Hey {hostname}");
        assert_eq!(config.downstream.host.as_deref(), Some("aloha.svc"));
        assert_eq!(config.downstream.port, Some(9090));
    }

    #[test]
    fn unrelated_vars_are_ignored() {
        let config = apply_env(HolaConfig::default(), vars(&[("PATH", "/usr/bin")]));
        assert!(config.greeting.hostname.is_none());
        assert!(config.downstream.url.is_none());
    }

    #[test]
    fn bad_port_is_skipped() {
        let config = apply_env(HolaConfig::default(), vars(&[("ALOHA_PORT", "not-a-port")]));
        assert!(config.downstream.port.is_none());
    }

    #[test]
    fn last_value_wins() {
        let config = apply_env(
            HolaConfig::default(),
            vars(&[("HOSTNAME", "first"), ("HOSTNAME", "second")]),
        );
        assert_eq!(config.greeting.hostname.as_deref(), Some("second"));
    }
}
