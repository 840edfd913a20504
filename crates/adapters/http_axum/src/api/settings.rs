//! JSON REST handlers for the client settings document.

use axum::Json;
use axum::extract::State;

use presencehub_app::ports::DocumentStore;
use presencehub_domain::settings::Settings;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/settings` — current settings document.
pub async fn get<S>(State(state): State<AppState<S>>) -> Json<Settings>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Json(state.settings_service.get())
}

/// `PUT /api/settings` — replace the settings document.
pub async fn replace<S>(
    State(state): State<AppState<S>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let settings = state.settings_service.replace(settings).await?;
    Ok(Json(settings))
}
