//! Remote endpoint resolution.
//!
//! # Responsibilities
//! - Determine the downstream base URL from environment and config
//! - Precedence: explicit URL, then host:port pair, then built-in default
//! - Cache the resolved target behind a short staleness window
//!
//! # Design Decisions
//! - No error path: an unparsable candidate is skipped, never surfaced
//! - The snapshot lives in an ArcSwap; a racing refresh is benign
//!   (last write wins)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use url::Url;

use crate::config::env::apply_downstream_var;
use crate::config::schema::DownstreamConfig;

/// Built-in downstream base URL, used when nothing is configured.
pub const DEFAULT_ALOHA_URL: &str = "http://aloha:8080/";

/// Resolved base URL of the downstream service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointTarget(Url);

impl EndpointTarget {
    fn new(mut url: Url) -> Self {
        // Relative joins need the base path to end in a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Self(url)
    }

    /// The base URL.
    pub fn base(&self) -> &Url {
        &self.0
    }

    /// Join a relative path onto the base.
    pub fn join(&self, path: &str) -> Url {
        self.0
            .join(path.trim_start_matches('/'))
            .unwrap_or_else(|_| self.0.clone())
    }
}

impl std::fmt::Display for EndpointTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

struct Snapshot {
    target: EndpointTarget,
    taken: Instant,
}

/// Per-process resolver with a bounded-staleness environment snapshot.
pub struct EndpointResolver {
    defaults: DownstreamConfig,
    ttl: Duration,
    snapshot: ArcSwap<Snapshot>,
}

impl EndpointResolver {
    pub fn new(defaults: DownstreamConfig) -> Self {
        let ttl = Duration::from_millis(defaults.cache_ttl_ms);
        let snapshot = Snapshot {
            target: Self::compute(&defaults, std::env::vars()),
            taken: Instant::now(),
        };
        Self {
            defaults,
            ttl,
            snapshot: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Resolve the current downstream target. Re-reads the environment once
    /// the cached snapshot is older than the configured staleness window.
    pub fn resolve(&self) -> EndpointTarget {
        let cached = self.snapshot.load();
        if cached.taken.elapsed() < self.ttl {
            return cached.target.clone();
        }

        let fresh = Snapshot {
            target: Self::compute(&self.defaults, std::env::vars()),
            taken: Instant::now(),
        };
        let target = fresh.target.clone();
        self.snapshot.store(Arc::new(fresh));
        target
    }

    /// Pure resolution over config defaults plus environment pairs.
    fn compute<I>(defaults: &DownstreamConfig, vars: I) -> EndpointTarget
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = defaults.clone();
        for (key, value) in vars {
            apply_downstream_var(&mut settings, &key, value);
        }

        if let Some(url) = settings.url.as_deref() {
            match Url::parse(url) {
                Ok(url) => return EndpointTarget::new(url),
                Err(error) => {
                    tracing::warn!(url = %url, error = %error, "Ignoring unparsable downstream URL");
                }
            }
        }

        if let (Some(host), Some(port)) = (settings.host.as_deref(), settings.port) {
            if let Ok(url) = Url::parse(&format!("http://{host}:{port}/")) {
                return EndpointTarget::new(url);
            }
            tracing::warn!(host = %host, port = port, "Ignoring unparsable downstream host/port");
        }

        EndpointTarget::new(Url::parse(DEFAULT_ALOHA_URL).expect("default URL parses"))
    }
}
