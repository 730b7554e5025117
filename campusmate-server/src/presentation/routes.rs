use crate::domain::error::DomainError;
use crate::presentation::handlers;
use actix_web::{Scope, web};

/// Everything the frontend talks to lives under `/api`. Each handler module
/// owns its prefix and decides which of its routes need a session.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(handlers::health::health)
        .service(handlers::auth::scope())
        .service(handlers::assignments::scope())
        .service(handlers::history::scope())
        .service(handlers::recommendations::scope())
        .service(handlers::ai::scope())
        .service(handlers::quizzes::scope())
}

/// Malformed bodies answer with the same `{"message": ...}` shape as every
/// other error instead of actix's plain-text default.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}
