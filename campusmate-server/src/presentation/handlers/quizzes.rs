use crate::application::ai_service::{AiService, GenerationKind};
use crate::application::document_service::extract_text;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::dto::{DocumentChatRequest, GenerateRequest, UploadResponse};
use crate::presentation::handlers::ai::relay_response;
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Scope, post, web};
use futures_util::TryStreamExt;
use tracing::{info, warn};
use uuid::Uuid;

pub fn scope() -> Scope {
    web::scope("/quizzes")
        .service(upload)
        .service(generate)
        .service(chat)
}

struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

fn multipart_error(err: actix_multipart::MultipartError) -> DomainError {
    DomainError::Validation(format!("Invalid multipart payload: {}", err))
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, DomainError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
            return Err(DomainError::Validation(format!(
                "File exceeds the {} byte upload limit",
                limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Takes the first part named `file`; every other part is drained and ignored.
async fn take_file(payload: &mut Multipart, limit: usize) -> Result<UploadedFile, DomainError> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let bytes = read_field(&mut field, limit).await?;
        return Ok(UploadedFile { filename, bytes });
    }

    Err(DomainError::validation("No file provided"))
}

#[post("/upload", wrap = "JwtAuthMiddleware")]
async fn upload(
    req: HttpRequest,
    user: AuthenticatedUser,
    config: web::Data<AppConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, DomainError> {
    let file = take_file(&mut payload, config.max_upload_bytes).await?;

    // pdf parsing is cpu bound
    let (filename, extracted_text) = web::block(move || {
        let text = extract_text(&file.filename, &file.bytes)?;
        Ok::<_, DomainError>((file.filename, text))
    })
    .await
    .map_err(|e| {
        warn!("document extraction task failed: {}", e);
        DomainError::Internal(e.to_string())
    })??;

    let session_id = format!("session-{}", Uuid::new_v4());

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        filename = %filename,
        session_id = %session_id,
        chars = extracted_text.chars().count(),
        "document processed"
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        session_id,
        extracted_text,
        message: "Document processed successfully".to_string(),
    }))
}

#[post("/generate", wrap = "JwtAuthMiddleware")]
async fn generate(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AiService>,
    payload: web::Json<GenerateRequest>,
) -> Result<HttpResponse, DomainError> {
    let GenerateRequest {
        kind,
        document_text,
    } = payload.into_inner();
    let kind: GenerationKind = kind.parse()?;
    let stream = service.generate(kind, document_text.as_deref()).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        kind = ?kind,
        "generation relay started"
    );

    Ok(relay_response(stream))
}

#[post("/chat", wrap = "JwtAuthMiddleware")]
async fn chat(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AiService>,
    payload: web::Json<DocumentChatRequest>,
) -> Result<HttpResponse, DomainError> {
    let DocumentChatRequest {
        messages,
        document_text,
    } = payload.into_inner();
    let stream = service
        .document_chat(messages, document_text.as_deref())
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "document chat relay started"
    );

    Ok(relay_response(stream))
}
