use crate::application::recommendation_service::RecommendationService;
use crate::domain::error::DomainError;
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, get, web};
use tracing::debug;

pub fn scope() -> Scope {
    web::scope("/recommendations")
        .service(study_plan)
}

#[get("/study-plan", wrap = "JwtAuthMiddleware")]
async fn study_plan(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<RecommendationService>,
) -> Result<HttpResponse, DomainError> {
    let plan = service.study_plan(user.id).await?;

    debug!(
        request_id = %request_id(&req),
        user_id = %user.id,
        weak = plan.weak_topics.len(),
        strong = plan.strong_topics.len(),
        "study plan computed"
    );

    Ok(HttpResponse::Ok().json(plan))
}
