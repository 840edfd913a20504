//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod locations;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, put};

use presencehub_app::ports::DocumentStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        // Locations
        .route(
            "/locations",
            get(locations::list::<S>).post(locations::report::<S>),
        )
        // Users
        .route("/users", get(users::list::<S>))
        .route(
            "/users/{name}",
            put(users::register::<S>).delete(users::unregister::<S>),
        )
        .route("/users/{name}/automations", get(automations::list_for_owner::<S>))
        // Automations
        .route(
            "/automations",
            get(automations::list::<S>).post(automations::create::<S>),
        )
        .route(
            "/automations/{id}",
            get(automations::get::<S>)
                .put(automations::update::<S>)
                .delete(automations::delete::<S>),
        )
        // Settings
        .route(
            "/settings",
            get(settings::get::<S>).put(settings::replace::<S>),
        )
}
