//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the three proxy routes and /health
//! - Wire up middleware (tracing, timeout, request ID)
//! - Branch preflight (OPTIONS → 204 + CORS) from real requests
//! - Run each pipeline behind the single error boundary
//! - Observability (metrics, request IDs)

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{MakeRequestUuid, QueryParams};
use crate::http::response;
use crate::observability::metrics;
use crate::sources::{earthquake, neo, orbital};
use crate::upstream::{ProxyError, UpstreamClient};

/// Application state injected into handlers.
///
/// Immutable after startup; every request sees the same client and config.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub config: Arc<ProxyConfig>,
}

/// HTTP server for the space data proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let state = AppState {
            upstream,
            config: Arc::new(config),
        };
        let router = Self::build_router(state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);
        Router::new()
            .route("/nasa-neo", get(neo_proxy).post(neo_proxy).options(preflight))
            .route(
                "/nasa-orbital",
                get(orbital_proxy).post(orbital_proxy).options(preflight),
            )
            .route(
                "/earthquake-data",
                get(earthquake_proxy).post(earthquake_proxy).options(preflight),
            )
            .route("/health", get(health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
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

/// Run one pipeline behind the single error boundary.
///
/// Any error raised at any stage converts here, exactly once, into the
/// failure envelope with HTTP 500.
async fn dispatch<F>(source: &'static str, pipeline: F) -> Response
where
    F: Future<Output = Result<Response, ProxyError>>,
{
    let start = Instant::now();
    match pipeline.await {
        Ok(response) => {
            metrics::record_request(source, StatusCode::OK.as_u16(), start);
            response
        }
        Err(error) => {
            tracing::error!(source = source, error = %error, "Proxy pipeline failed");
            metrics::record_request(source, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
            error.into_response()
        }
    }
}

/// NEO proxy handler. Parameters come from the query string only.
async fn neo_proxy(State(state): State<AppState>, uri: Uri) -> Response {
    let query = QueryParams::from_uri(&uri);
    dispatch(
        "neo",
        neo::handle(&state.upstream, &state.config.upstream, &query),
    )
    .await
}

/// Orbital proxy handler.
async fn orbital_proxy(State(state): State<AppState>, uri: Uri) -> Response {
    let query = QueryParams::from_uri(&uri);
    dispatch(
        "orbital",
        orbital::handle(&state.upstream, &state.config.upstream, &query),
    )
    .await
}

/// Earthquake proxy handler.
async fn earthquake_proxy(State(state): State<AppState>, uri: Uri) -> Response {
    let query = QueryParams::from_uri(&uri);
    dispatch(
        "earthquake",
        earthquake::handle(&state.upstream, &state.config.upstream, &query),
    )
    .await
}

/// OPTIONS preflight handler shared by the three proxy routes.
async fn preflight() -> Response {
    response::preflight()
}

/// Liveness probe.
async fn health() -> &'static str {
    "OK"
}
