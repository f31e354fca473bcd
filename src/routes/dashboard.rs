//! `GET /dashboard` and `GET /dashboard/latest`: the derived, display-ready view.
//!
//! Unlike `/weather`, a request with no location at all falls back to the
//! configured default city. Each refresh is sequenced through
//! [`crate::LatestView`] so `/dashboard/latest` never regresses to an older
//! response.

use std::sync::Arc;

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use chrono::Utc;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use super::AppState;
use crate::{Dashboard, Location, LocationQuery, WeatherError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/dashboard", get(handler))
        .route("/dashboard/latest", get(latest))
}

async fn handler(
    Query(params): Query<LocationQuery>,
    State(state): State<AppState>,
) -> Result<Json<Arc<Dashboard>>, WeatherError> {
    // ---
    let ticket = state.latest.begin();
    let span = tracing::info_span!(
        "dashboard",
        request_id = %Uuid::new_v4(),
        ticket = ticket.id()
    );

    async move {
        info!("GET /dashboard - {:?}", params);

        state.aggregator.api_key()?;
        let location = if params.is_empty() {
            debug!("No location given, using {}", state.config.default_city);
            Location::City(state.config.default_city.clone())
        } else {
            params.resolve()?
        };

        // Step 1: fetch
        let combined = state.aggregator.fetch_combined(&location).await?;

        // Step 2: derive the view, all or nothing
        let view = Arc::new(Dashboard::build(&combined, &state.config.icon_url, Utc::now())?);

        // Step 3: publish unless a newer refresh already has
        if !state.latest.publish(ticket, Arc::clone(&view)) {
            debug!("GET /dashboard - newer view already published");
        }

        info!("Dashboard ready for {}", view.city);
        Ok::<_, WeatherError>(Json(view))
    }
    .instrument(span)
    .await
}

async fn latest(State(state): State<AppState>) -> Result<Json<Arc<Dashboard>>, WeatherError> {
    // ---
    state
        .latest
        .current()
        .map(Json)
        .ok_or(WeatherError::NoDashboard)
}
