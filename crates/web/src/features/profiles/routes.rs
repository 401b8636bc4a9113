use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{get_profile, list_profiles, upsert_profile};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(upsert_profile))
        .route("/profiles", get(list_profiles))
}
