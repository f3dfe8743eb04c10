//! Shared handler state

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::causality::CausalGraph;
use crate::observability::MetricsRegistry;
use crate::storage::Store;
use crate::transition::{ActualizationPolicy, TransitionEngine};

/// Everything a request handler can reach, built over one store.
pub struct AppState<S: Store> {
    pub catalog: Catalog<S>,
    pub engine: TransitionEngine<S>,
    pub graph: CausalGraph<S>,
    pub metrics: Arc<MetricsRegistry>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: Arc<S>, policy: ActualizationPolicy) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        Self {
            catalog: Catalog::new(store.clone(), metrics.clone()),
            engine: TransitionEngine::new(store.clone(), metrics.clone()).with_policy(policy),
            graph: CausalGraph::new(store, metrics.clone()),
            metrics,
        }
    }
}

pub type SharedState<S> = Arc<AppState<S>>;
