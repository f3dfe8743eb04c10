//! HTTP surface
//!
//! A thin axum layer mapping requests to catalog, transition engine and
//! causal graph operations.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/substances`, `/kinds`, `/attributes`, `/modes` - catalog
//! - `/api/v1/potentialities` - potentialities, readiness, actualization
//! - `/api/v1/causes`, `/api/v1/substances/:id/causes` - causal graph
//! - `/observability/metrics` - counters

pub mod config;
pub mod errors;
pub mod server;
pub mod state;

mod causality_routes;
mod observability_routes;
mod ontology_routes;
mod transition_routes;

pub use config::HttpServerConfig;
pub use errors::{RestError, RestResult};
pub use server::{build_router, HttpServer};
pub use state::{AppState, SharedState};
