use crate::application::ai_service::AiService;
use crate::domain::error::DomainError;
use crate::infrastructure::llm::RelayStream;
use crate::presentation::dto::ChatRequest;
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, post, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/ai").service(chat)
}

/// Upstream bytes go out exactly as received; nothing is buffered or parsed.
pub(crate) fn relay_response(stream: RelayStream) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .streaming(stream)
}

#[post("/chat", wrap = "JwtAuthMiddleware")]
async fn chat(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AiService>,
    payload: web::Json<ChatRequest>,
) -> Result<HttpResponse, DomainError> {
    let messages = payload.into_inner().messages;
    let count = messages.len();
    let stream = service.chat(messages).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        messages = count,
        "chat relay started"
    );

    Ok(relay_response(stream))
}
