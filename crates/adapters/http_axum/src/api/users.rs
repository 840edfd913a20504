//! JSON REST handlers for registered users.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use presencehub_app::ports::DocumentStore;
use presencehub_domain::id::EntityId;
use presencehub_domain::user::{DeliveryAddress, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a user.
#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub address: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<User>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Ok(Json<User>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the unregister endpoint.
pub enum UnregisterResponse {
    NoContent,
}

impl IntoResponse for UnregisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/users` — list registered users.
pub async fn list<S>(State(state): State<AppState<S>>) -> ListResponse
where
    S: DocumentStore + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.user_service.list()))
}

/// `PUT /api/users/:name` — register a user or replace its address.
pub async fn register<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<RegisterResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let name = EntityId::new(name)?;
    let address = DeliveryAddress::new(req.address)?;
    let user = state.user_service.register(name, address).await?;
    Ok(RegisterResponse::Ok(Json(user)))
}

/// `DELETE /api/users/:name` — unregister a user.
pub async fn unregister<S>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<UnregisterResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let name = EntityId::new(name)?;
    state.user_service.unregister(&name).await?;
    Ok(UnregisterResponse::NoContent)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn should_register_and_list_users() {
        let app = test_app();

        let (status, body) = call(
            app.router(),
            "PUT",
            "/api/users/alice",
            Some(json!({"address": "token-a"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "alice", "address": "token-a"}));

        let (status, body) = call(app.router(), "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"name": "alice", "address": "token-a"}]));
        assert_eq!(
            app.store.get("users", "users"),
            Some(json!({"alice": "token-a"}))
        );
    }

    #[tokio::test]
    async fn should_reject_empty_address() {
        let app = test_app();
        let (status, _) = call(
            app.router(),
            "PUT",
            "/api/users/alice",
            Some(json!({"address": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_unregister_user() {
        let app = test_app();
        call(
            app.router(),
            "PUT",
            "/api/users/alice",
            Some(json!({"address": "token-a"})),
        )
        .await;

        let (status, _) = call(app.router(), "DELETE", "/api/users/alice", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = call(app.router(), "GET", "/api/users", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn should_return_not_found_when_unregistering_unknown_user() {
        let app = test_app();
        let (status, body) = call(app.router(), "DELETE", "/api/users/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User ghost not found");
    }
}
