use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::competition_overview,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::registration_eligibility,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
        features::registrations::handlers::create_registration,
        features::registrations::handlers::my_registrations,
        features::registrations::handlers::list_registrations,
        features::registrations::handlers::update_registration_status,
        features::submissions::handlers::submission_eligibility,
        features::submissions::handlers::create_submission,
        features::submissions::handlers::my_submissions,
        features::submissions::handlers::get_submission,
        features::submissions::handlers::list_submissions,
        features::submissions::handlers::update_submission_status,
        features::profiles::handlers::get_profile,
        features::profiles::handlers::upsert_profile,
        features::profiles::handlers::list_profiles,
        features::dashboard::handlers::participant_dashboard,
        features::dashboard::handlers::admin_dashboard,
    ),
    components(
        schemas(
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::UpdateCompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::CompetitionSummary,
            storage::dto::competition::CompetitionOverviewResponse,
            storage::dto::common::EligibilityResponse,
            storage::dto::registration::CreateRegistrationRequest,
            storage::dto::registration::UpdateRegistrationStatusRequest,
            storage::dto::registration::RegistrationResponse,
            storage::dto::registration::RegistrationWithCompetition,
            storage::dto::registration::RegistrationDetail,
            storage::dto::registration::RegistrationListResponse,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::UpdateSubmissionStatusRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::SubmissionWithCompetition,
            storage::dto::submission::SubmissionDetail,
            storage::dto::submission::SubmissionListResponse,
            storage::dto::submission::SubmissionEligibilityResponse,
            storage::dto::submission::MySubmissionsResponse,
            storage::dto::profile::UpsertProfileRequest,
            storage::dto::profile::ProfileResponse,
            storage::dto::dashboard::ParticipantDashboardResponse,
            storage::dto::dashboard::AdminDashboardResponse,
            storage::models::Competition,
            storage::models::Profile,
            storage::models::Registration,
            storage::models::Submission,
            storage::services::lifecycle::ReasonCode,
            storage::services::lifecycle::CompetitionTotals,
            storage::services::lifecycle::RegistrationCounts,
            storage::services::lifecycle::SubmissionCounts,
        )
    ),
    tags(
        (name = "competitions", description = "Competition catalogue and lifecycle endpoints"),
        (name = "registrations", description = "Participant registration endpoints"),
        (name = "submissions", description = "Work submission and review endpoints"),
        (name = "profiles", description = "Participant profile endpoints"),
        (name = "dashboard", description = "Landing page aggregates"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id_header",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(
                            middleware::auth::USER_ID_HEADER,
                        ),
                    ),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Competition Hub API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", features::api_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
