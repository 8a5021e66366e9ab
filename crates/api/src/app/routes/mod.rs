use axum::{
    routing::{get, post, put},
    Router,
};

pub mod auth;
pub mod informations;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new().nest("/informations", informations_router())
}

fn informations_router() -> Router {
    Router::new()
        .route("/add", post(informations::add_information))
        .route("/my-informations", get(informations::my_informations))
        .route("/all-informations", get(informations::all_informations))
        .route("/my-view", get(informations::my_view))
        .route("/profile", get(informations::profile))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            put(users::update_user).delete(users::delete_user),
        )
}
