//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, trace context, identity)
//! - Bind server to listener, serve with graceful shutdown
//! - Keep /health outside the traced stack

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HolaConfig;
use crate::downstream::{AlohaClient, EndpointResolver};
use crate::greeting::Greeter;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::security::{Identity, IdentityResolver};
use crate::trace::{HeaderTracer, NoopTracer, TraceContext, Tracer};

/// Liveness response, fixed by contract.
const HEALTH_BODY: &str = "I'm ok";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub greeter: Arc<Greeter>,
    pub tracer: Arc<dyn Tracer>,
    pub identity: Arc<IdentityResolver>,
}

/// Trace context of the current request span, stored at ingress.
#[derive(Clone, Copy, Debug)]
pub struct RequestTrace(pub TraceContext);

/// Identity resolved at ingress; None when the request is anonymous.
#[derive(Clone, Debug)]
pub struct CurrentIdentity(pub Option<Identity>);

/// HTTP server for the greeting service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: HolaConfig) -> Self {
        let tracer: Arc<dyn Tracer> = if config.tracing.enabled {
            Arc::new(HeaderTracer)
        } else {
            Arc::new(NoopTracer)
        };

        let resolver = Arc::new(EndpointResolver::new(config.downstream.clone()));
        let aloha = Arc::new(AlohaClient::new(
            tracer.clone(),
            Duration::from_millis(config.downstream.timeout_ms),
        ));
        let greeter = Arc::new(Greeter::new(&config.greeting, resolver, aloha));
        let identity = Arc::new(IdentityResolver::new(config.auth.clone()));

        let state = AppState {
            greeter,
            tracer,
            identity,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// /health is added after the layers so the liveness probe bypasses
    /// request IDs, tracing, and identity resolution entirely.
    fn build_router(config: &HolaConfig, state: AppState) -> Router {
        let stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(middleware::from_fn(record_request_metrics))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                trace_context_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                resolve_identity_middleware,
            ));

        Router::new()
            .route("/hola", get(hola))
            .route("/hola-chaining", get(hola_chaining))
            .route("/hola-secured", get(hola_secured))
            .layer(stack)
            .route("/health", get(health))
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Extract the inbound trace context and open the request span.
///
/// The span is finished here, after the response (fallback included) is
/// fully determined. Handlers see only the span's context.
async fn trace_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let inbound = state.tracer.extract(request.headers());
    let mut span = state.tracer.start_span(&inbound, request.method().as_str());
    span.tag("http.method", request.method().to_string());
    span.tag("http.url", request.uri().to_string());
    request.extensions_mut().insert(RequestTrace(*span.context()));

    let response = next.run(request).await;

    state.tracer.finish(span, response.status().as_u16());
    response
}

/// Resolve the request identity once at ingress.
async fn resolve_identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = state.identity.resolve(request.headers());
    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}

async fn record_request_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, &path, response.status().as_u16(), started);
    response
}

/// `GET /hola` → the formatted local greeting.
async fn hola(State(state): State<AppState>) -> String {
    state.greeter.local()
}

/// `GET /hola-chaining` → local greeting plus the downstream greetings
/// (or the fallback). Never an error status for downstream failure.
async fn hola_chaining(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    headers: axum::http::HeaderMap,
) -> Json<Vec<String>> {
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok());
    Json(state.greeter.compose_chained(&trace.0, request_id).await)
}

/// `GET /hola-secured` → greets the authenticated principal, 401 without
/// an established identity.
async fn hola_secured(
    State(state): State<AppState>,
    Extension(identity): Extension<CurrentIdentity>,
) -> Result<String, StatusCode> {
    match identity.0 {
        Some(identity) => Ok(format!(
            "Hola {} de {}",
            identity.name(),
            state.greeter.hostname()
        )),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// `GET /health` → fixed liveness literal.
async fn health() -> &'static str {
    HEALTH_BODY
}
