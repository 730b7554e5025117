use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::domain::user::ProfileUpdate;
use crate::infrastructure::config::AppConfig;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserEnvelope,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, auth_cookie, expired_auth_cookie, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, get, patch, post, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(register)
        .service(login)
        .service(logout)
        .service(me)
        .service(update_me)
}

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let user = service.register(name, email, password).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(UserEnvelope {
        message: Some("User created successfully"),
        user: user.into(),
    }))
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    service: web::Data<AuthService>,
    config: web::Data<AppConfig>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let (user, jwt) = service.login(&payload.email, &payload.password).await?;
    let expires_in = service.keys().ttl().num_seconds();

    info!(request_id = %request_id(&req), user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(jwt.clone(), expires_in, config.cookie_secure))
        .json(AuthResponse {
            message: "Login successful",
            access_token: jwt,
            expires_in,
            token_type: "Bearer".to_string(),
        }))
}

#[post("/logout")]
async fn logout(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(expired_auth_cookie(config.cookie_secure))
        .json(MessageResponse {
            message: "Logged out",
        })
}

#[get("/me", wrap = "JwtAuthMiddleware")]
async fn me(
    user: AuthenticatedUser,
    service: web::Data<AuthService>,
) -> Result<HttpResponse, DomainError> {
    let user = service.get_user(user.id).await?;
    Ok(HttpResponse::Ok().json(UserEnvelope {
        message: None,
        user: user.into(),
    }))
}

#[patch("/me", wrap = "JwtAuthMiddleware")]
async fn update_me(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AuthService>,
    payload: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, DomainError> {
    let updated = service.update_profile(user.id, payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        email = %user.email,
        "profile updated"
    );

    Ok(HttpResponse::Ok().json(UserEnvelope {
        message: Some("Profile updated"),
        user: updated.into(),
    }))
}
