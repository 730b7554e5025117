use crate::application::history_service::HistoryService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{HistoryList, QuizResultRequest, QuizResultResponse};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, get, post, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/history")
        .service(save_quiz_result)
        .service(quiz_history)
}

#[post("/quiz", wrap = "JwtAuthMiddleware")]
async fn save_quiz_result(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<HistoryService>,
    payload: web::Json<QuizResultRequest>,
) -> Result<HttpResponse, DomainError> {
    let QuizResultRequest {
        topic,
        score,
        total_questions,
    } = payload.into_inner();
    let record = service
        .record(user.id, topic, score, total_questions)
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        topic = %record.topic,
        percentage = record.percentage,
        "quiz result saved"
    );

    Ok(HttpResponse::Created().json(QuizResultResponse {
        message: "Quiz result saved successfully",
        percentage: record.percentage,
        id: record.id,
    }))
}

#[get("/quiz", wrap = "JwtAuthMiddleware")]
async fn quiz_history(
    user: AuthenticatedUser,
    service: web::Data<HistoryService>,
) -> Result<HttpResponse, DomainError> {
    let history = service.list(user.id).await?;
    Ok(HttpResponse::Ok().json(HistoryList { history }))
}
