use axum::{
    Router,
    routing::{get, post},
};

pub mod cars;
pub mod system;
pub mod users;

/// Router for every endpoint. Each path accepts exactly the methods listed;
/// anything else is answered with 405 by the router itself. Unknown paths get
/// a plain-text 404.
pub fn router() -> Router {
    Router::new()
        .route("/status", get(system::status))
        .route("/add-user", post(users::add_user))
        .route("/update-user", post(users::update_user))
        .route(
            "/delete-user",
            get(users::delete_user).delete(users::delete_user),
        )
        .route("/get-user/:user_id", get(users::get_user))
        .route("/get-all-users", get(users::get_all_users))
        .route("/add-car", post(cars::add_car))
        .route("/update-car", post(cars::update_car))
        .fallback(system::not_found)
}
