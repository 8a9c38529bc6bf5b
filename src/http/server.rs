//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single dispatch handler
//! - Wire up middleware (handler timeout, gzip for static assets)
//! - Bind server to listener with peer address info
//! - Dispatch requests through the routing engine
//! - Stop on the shutdown signal, draining in-flight responses

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Extensions, HeaderMap, Request, StatusCode, Version},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    compression::{predicate::DefaultPredicate, CompressionLayer, Predicate},
    timeout::TimeoutLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::response::{self, ServeError, StaticAsset};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::payload::PayloadStreamer;
use crate::routing::{Route, Router as RequestRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
    pub streamer: PayloadStreamer,
    pub channel_depth: usize,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            router: Arc::new(RequestRouter::from_config(config)),
            streamer: PayloadStreamer::new(config.download.fill),
            channel_depth: config.download.channel_depth.max(1),
        }
    }
}

/// HTTP server for the diagnostic endpoints and static assets.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// There is deliberately no `TraceLayer`: requests are not access-logged.
    /// Gzip only ever applies to static assets; synthetic payloads go out as-is.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let compress_when = DefaultPredicate::new().and(is_static_asset);

        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(CompressionLayer::new().compress_when(compress_when))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
    }

    /// The Axum router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.config.static_files.base_path.display(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        // Serve with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Compression predicate: only responses tagged by the static file handler.
fn is_static_asset(_: StatusCode, _: Version, _: &HeaderMap, extensions: &Extensions) -> bool {
    extensions.get::<StaticAsset>().is_some()
}

/// Classify the request and hand it to the matching handler.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let route = state.router.classify(request.method(), request.uri());
    metrics::record_route(route.label());

    match route {
        Route::Download(params) => handlers::download(&state, params),
        Route::IpEcho => response::ip_echo(peer.ip()),
        Route::Ping => response::empty(),
        Route::Upload => {
            // body is never read
            drop(request);
            response::empty()
        }
        Route::StaticFile(target) => handlers::static_file(&state, target).await,
        Route::NotFound(path) => ServeError::NoRoute(path).into_response(),
    }
}
