//! JSON REST handlers for automations.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use presencehub_app::ports::DocumentStore;
use presencehub_domain::automation::{Action, Automation};
use presencehub_domain::error::{PresenceHubError, ValidationError};
use presencehub_domain::id::{AutomationId, EntityId};
use presencehub_domain::location::Location;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing an automation.
///
/// Accepts the same older field names as stored automations (`Me`,
/// `Locations`, `Actions`, `LeaveActions`).
#[derive(Deserialize)]
pub struct AutomationRequest {
    #[serde(alias = "Me")]
    pub owner: EntityId,
    #[serde(default, alias = "Locations", alias = "locations")]
    pub conditions: BTreeMap<EntityId, Location>,
    #[serde(default, alias = "Actions", alias = "actions")]
    pub enter_actions: Vec<Action>,
    #[serde(default, alias = "LeaveActions")]
    pub leave_actions: Vec<Action>,
}

impl AutomationRequest {
    fn into_automation(self, id: Option<AutomationId>) -> Result<Automation, PresenceHubError> {
        let mut builder = Automation::builder().owner(self.owner);
        if let Some(id) = id {
            builder = builder.id(id);
        }
        for (entity, location) in self.conditions {
            builder = builder.condition(entity, location);
        }
        for action in self.enter_actions {
            builder = builder.on_enter(action);
        }
        for action in self.leave_actions {
            builder = builder.on_leave(action);
        }
        builder.build()
    }
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Automation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Automation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Automation>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<AutomationId, ApiError> {
    AutomationId::from_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()).into())
}

/// `GET /api/automations` — list all automations.
pub async fn list<S>(State(state): State<AppState<S>>) -> ListResponse
where
    S: DocumentStore + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.automation_service.list()))
}

/// `GET /api/users/:name/automations` — list one owner's automations in order.
pub async fn list_for_owner<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let owner = EntityId::new(name)?;
    Ok(ListResponse::Ok(Json(
        state.automation_service.list_for_owner(&owner),
    )))
}

/// `GET /api/automations/:id` — get automation by ID.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let automation = state.automation_service.get(parse_id(&id)?)?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /api/automations` — create a new automation.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    Json(req): Json<AutomationRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let automation = req.into_automation(None)?;
    let created = state.automation_service.create(automation).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/automations/:id` — replace an automation, keeping its position.
pub async fn update<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<AutomationRequest>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let automation = req.into_automation(Some(parse_id(&id)?))?;
    let updated = state.automation_service.update(automation).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/automations/:id` — delete an automation.
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    state.automation_service.delete(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
