//! JSON REST handlers for location reports.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use presencehub_app::ports::DocumentStore;
use presencehub_domain::id::EntityId;
use presencehub_domain::location::{Location, Presence};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for reporting where an entity is.
#[derive(Deserialize)]
pub struct ReportLocationRequest {
    pub entity: String,
    pub location: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Presence>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the report endpoint.
pub enum ReportResponse {
    /// The report was taken; whether it changed anything is not disclosed.
    Accepted,
}

impl IntoResponse for ReportResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => StatusCode::ACCEPTED.into_response(),
        }
    }
}

/// `GET /api/locations` — latest location of every tracked entity.
pub async fn list<S>(State(state): State<AppState<S>>) -> ListResponse
where
    S: DocumentStore + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.engine.locations().list()))
}

/// `POST /api/locations` — report an entity's location.
///
/// Reports for unregistered entities are accepted and ignored.
pub async fn report<S>(
    State(state): State<AppState<S>>,
    Json(req): Json<ReportLocationRequest>,
) -> Result<ReportResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let entity = EntityId::new(req.entity)?;
    let location = Location::new(req.location)?;
    state.engine.report_location(&entity, &location);
    Ok(ReportResponse::Accepted)
}
