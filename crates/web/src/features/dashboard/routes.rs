use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{admin_dashboard, participant_dashboard};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(participant_dashboard))
        .route("/admin", get(admin_dashboard))
}
