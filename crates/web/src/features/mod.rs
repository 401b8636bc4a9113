pub mod competitions;
pub mod dashboard;
pub mod profiles;
pub mod registrations;
pub mod submissions;

use axum::Router;
use storage::Database;

/// The full API surface, mounted under `/api` by the caller.
pub fn api_router() -> Router<Database> {
    Router::new()
        .nest("/competitions", competitions::routes::routes())
        .nest("/registrations", registrations::routes::routes())
        .nest("/submissions", submissions::routes::routes())
        .nest("/dashboard", dashboard::routes::routes())
        .merge(profiles::routes::routes())
}
