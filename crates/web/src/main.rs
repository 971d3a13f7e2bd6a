use std::time::Duration;

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
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::participants::handlers::list_participants,
        features::participants::handlers::get_participant,
        features::participants::handlers::create_participant,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::participants::handlers::delete_all_participants,
        features::participants::handlers::record_times,
        features::participants::handlers::record_times_bulk,
        features::rounds::handlers::complete_round,
        features::rounds::handlers::reset_results,
        features::ranking::handlers::get_ranking,
        features::live::handlers::get_active,
        features::live::handlers::get_active_id,
        features::live::handlers::set_active,
        features::live::handlers::clear_active,
    ),
    components(
        schemas(
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::RecordTimesRequest,
            storage::dto::participant::ParticipantTimes,
            storage::dto::participant::BulkTimesRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ActiveParticipantId,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::QualificationInfo,
            storage::dto::round::RoundOutcome,
            storage::dto::round::ResetOutcome,
            storage::models::Participant,
            storage::models::Round,
        )
    ),
    tags(
        (name = "participants", description = "Registration and ride time endpoints"),
        (name = "rounds", description = "Round completion and results reset"),
        (name = "rankings", description = "Public leaderboard"),
        (name = "live", description = "Active rider for the audience screen"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
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

    tracing::info!("Starting Bullride API");

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

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write endpoint will answer 401");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .nest("/api", features::routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_round_completion() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/rounds/{round}/complete"));
        assert!(doc.paths.paths.contains_key("/api/live/active-id"));
        assert!(doc.paths.paths.contains_key("/api/rankings"));
    }
}
