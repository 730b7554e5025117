use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::NotAuthenticated.into())),
        }
    }
}

/// Cookie first (browser clients), then `Authorization: Bearer` for
/// everything else.
pub fn token_from_parts(cookie: Option<String>, authorization: Option<&str>) -> Option<String> {
    if let Some(token) = cookie.filter(|t| !t.is_empty()) {
        return Some(token);
    }
    let value = authorization?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    token_from_parts(
        req.cookie(AUTH_COOKIE).map(|c| c.value().to_string()),
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    )
}

pub fn auth_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

pub fn expired_auth_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = auth_cookie(String::new(), 0, secure);
    cookie.make_removal();
    cookie
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
