use std::sync::Arc;

use axum::Router;

use crate::{Aggregator, Config, LatestView};

mod dashboard;
mod health;
mod weather;

// ---

/// Shared state handed to every route.
#[derive(Debug, Clone)]
pub struct AppState {
    // ---
    pub config: Config,
    pub aggregator: Aggregator,
    pub latest: Arc<LatestView>,
}

impl AppState {
    pub fn new(config: Config, aggregator: Aggregator) -> Self {
        Self {
            config,
            aggregator,
            latest: Arc::new(LatestView::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(weather::router())
        .merge(dashboard::router())
        .merge(health::router())
        .with_state(state)
}
