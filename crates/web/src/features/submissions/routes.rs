use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_submission, get_submission, list_submissions, my_submissions, submission_eligibility,
    update_submission_status,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_submissions))
        .route("/", post(create_submission))
        .route("/eligibility", get(submission_eligibility))
        .route("/mine", get(my_submissions))
        .route("/:id", get(get_submission))
        .route("/:id/status", put(update_submission_status))
}
