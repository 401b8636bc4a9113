use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_registration, list_registrations, my_registrations, update_registration_status,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_registrations))
        .route("/", post(create_registration))
        .route("/mine", get(my_registrations))
        .route("/:id/status", put(update_registration_status))
}
