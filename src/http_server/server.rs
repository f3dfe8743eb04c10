//! HTTP server combining every router under one shared state

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::causality_routes::causality_routes;
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::ontology_routes::ontology_routes;
use super::state::AppState;
use super::transition_routes::transition_routes;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::storage::Store;

pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new<S: Store + 'static>(config: HttpServerConfig, state: Arc<AppState<S>>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        self.config
            .bind_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    /// The assembled router, for in-process requests.
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves until Ctrl-C.
    pub async fn start(self) -> io::Result<()> {
        let addr = self.bind_addr()?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("addr", &addr.to_string())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

/// Routes:
/// - `/health`
/// - `/api/v1/...` ontology, potentialities, causes
/// - `/observability/metrics`
pub fn build_router<S: Store + 'static>(config: &HttpServerConfig, state: Arc<AppState<S>>) -> Router {
    let api = Router::new()
        .merge(ontology_routes::<S>())
        .merge(transition_routes::<S>())
        .merge(causality_routes::<S>());

    Router::new()
        .merge(health_routes::<S>())
        .nest("/api/v1", api)
        .nest("/observability", observability_routes::<S>())
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(config.allowed_origins())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;
    use crate::transition::ActualizationPolicy;

    fn state() -> Arc<AppState<RecordStore>> {
        Arc::new(AppState::new(
            Arc::new(RecordStore::in_memory()),
            ActualizationPolicy::Once,
        ))
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 9000,
            ..Default::default()
        };
        let server = HttpServer::new(config, state());
        assert_eq!(server.bind_addr().unwrap().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds_with_any_origin() {
        let config = HttpServerConfig {
            cors_origins: vec![],
            ..Default::default()
        };
        let _router = HttpServer::new(config, state()).router();
    }
}
