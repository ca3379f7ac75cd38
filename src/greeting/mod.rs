//! Greeting composition.
//!
//! # Data Flow
//! ```text
//! /hola:          Greeter::local() → formatted template
//! /hola-chaining: Greeter::compose_chained()
//!     → local greeting (always first)
//!     → EndpointResolver::resolve() → AlohaClient::greetings()
//!     → concatenated sequence (downstream part may be the fallback)
//! ```

use std::sync::Arc;

use crate::config::schema::GreetingConfig;
use crate::downstream::{AlohaClient, EndpointResolver};
use crate::trace::TraceContext;

/// Host identifier used when none is configured or in the environment.
pub const DEFAULT_HOSTNAME: &str = "unknown";

const HOSTNAME_PLACEHOLDER: &str = "{hostname}";

/// Composes greeting responses from the local template and the downstream
/// service. The host identifier is fixed at construction time.
pub struct Greeter {
    template: String,
    hostname: String,
    resolver: Arc<EndpointResolver>,
    aloha: Arc<AlohaClient>,
}

impl Greeter {
    pub fn new(
        config: &GreetingConfig,
        resolver: Arc<EndpointResolver>,
        aloha: Arc<AlohaClient>,
    ) -> Self {
        Self {
            template: config.template.clone(),
            hostname: config
                .hostname
                .clone()
                .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string()),
            resolver,
            aloha,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The local greeting: the template with the host identifier
    /// substituted.
    pub fn local(&self) -> String {
        self.template.replacen(HOSTNAME_PLACEHOLDER, &self.hostname, 1)
    }

    /// The chained greeting: local greeting first, then whatever the
    /// downstream call produced (possibly the fallback). Always returns at
    /// least one element and never fails.
    pub async fn compose_chained(
        &self,
        context: &TraceContext,
        request_id: Option<&str>,
    ) -> Vec<String> {
        let mut greetings = vec![self.local()];
        let target = self.resolver.resolve();
        greetings.extend(self.aloha.greetings(&target, context, request_id).await);
        greetings
    }
}
