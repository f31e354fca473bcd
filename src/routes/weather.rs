//! `GET /weather`: the combined upstream document, passed through as-is.

use axum::{extract::Query, extract::State, routing::get, Json, Router};
use tracing::{info, Instrument};
use uuid::Uuid;

use super::AppState;
use crate::{CombinedDocument, LocationQuery, WeatherError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/weather", get(handler))
}

async fn handler(
    Query(params): Query<LocationQuery>,
    State(state): State<AppState>,
) -> Result<Json<CombinedDocument>, WeatherError> {
    // ---
    let span = tracing::info_span!("weather", request_id = %Uuid::new_v4());

    async move {
        info!("GET /weather - {:?}", params);

        // Credential first, then location
        state.aggregator.api_key()?;
        let location = params.resolve()?;

        let combined = state.aggregator.fetch_combined(&location).await?;
        Ok::<_, WeatherError>(Json(combined))
    }
    .instrument(span)
    .await
}
