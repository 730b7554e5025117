mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use application::ai_service::AiService;
use application::assignment_service::AssignmentService;
use application::auth_service::AuthService;
use application::history_service::HistoryService;
use application::recommendation_service::RecommendationService;
use data::assignment_repository::PostgresAssignmentRepository;
use data::quiz_repository::PostgresQuizHistoryRepository;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::llm::LlmClient;
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use presentation::routes::{api_scope, json_config, path_config};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let assignment_repo = Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let history_repo = Arc::new(PostgresQuizHistoryRepository::new(pool.clone()));

    let keys = JwtKeys::with_ttl(
        &config.jwt_secret,
        chrono::Duration::hours(config.token_ttl_hours),
    );
    let auth_service = AuthService::new(user_repo.clone(), keys);
    let assignment_service = AssignmentService::new(assignment_repo);
    let history_service = HistoryService::new(history_repo.clone());
    let recommendation_service = RecommendationService::new(user_repo, history_repo);
    let ai_service = AiService::new(LlmClient::new(&config.llm));

    let bind_address = (config.host.clone(), config.port);
    info!(
        host = %bind_address.0,
        port = bind_address.1,
        model = %config.llm.model,
        "HTTP server starting"
    );

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TimingMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(json_config(config_data.max_upload_bytes))
            .app_data(path_config())
            .app_data(config_data.clone())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(assignment_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(recommendation_service.clone()))
            .app_data(web::Data::new(ai_service.clone()))
            .service(api_scope())
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
