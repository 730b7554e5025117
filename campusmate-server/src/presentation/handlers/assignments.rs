use crate::application::assignment_service::AssignmentService;
use crate::domain::assignment::AssignmentUpdate;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    AssignmentEnvelope, AssignmentList, CreateAssignmentRequest, MessageResponse,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::utils::{AuthenticatedUser, request_id};
use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, route, web};
use tracing::info;
use uuid::Uuid;

pub fn scope() -> Scope {
    web::scope("/assignments")
        .service(list_assignments)
        .service(create_assignment)
        .service(get_assignment)
        .service(update_assignment)
        .service(delete_assignment)
}

#[get("", wrap = "JwtAuthMiddleware")]
async fn list_assignments(
    user: AuthenticatedUser,
    service: web::Data<AssignmentService>,
) -> Result<HttpResponse, DomainError> {
    let assignments = service.list(user.id).await?;
    Ok(HttpResponse::Ok().json(AssignmentList {
        assignments: assignments.into_iter().map(Into::into).collect(),
    }))
}

#[post("", wrap = "JwtAuthMiddleware")]
async fn create_assignment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AssignmentService>,
    payload: web::Json<CreateAssignmentRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreateAssignmentRequest {
        title,
        course,
        status,
        score,
    } = payload.into_inner();
    let assignment = service
        .create(user.id, title, course, status, score)
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        assignment_id = %assignment.id,
        "assignment created"
    );

    Ok(HttpResponse::Created().json(AssignmentEnvelope {
        message: Some("Assignment created"),
        assignment: assignment.into(),
    }))
}

#[get("/{id}", wrap = "JwtAuthMiddleware")]
async fn get_assignment(
    user: AuthenticatedUser,
    service: web::Data<AssignmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let assignment = service.get(path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(AssignmentEnvelope {
        message: None,
        assignment: assignment.into(),
    }))
}

#[route("/{id}", method = "PUT", method = "PATCH", wrap = "JwtAuthMiddleware")]
async fn update_assignment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AssignmentService>,
    path: web::Path<Uuid>,
    payload: web::Json<AssignmentUpdate>,
) -> Result<HttpResponse, DomainError> {
    let assignment_id = path.into_inner();
    let assignment = service
        .update(assignment_id, user.id, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        assignment_id = %assignment_id,
        "assignment updated"
    );

    Ok(HttpResponse::Ok().json(AssignmentEnvelope {
        message: Some("Assignment updated"),
        assignment: assignment.into(),
    }))
}

#[delete("/{id}", wrap = "JwtAuthMiddleware")]
async fn delete_assignment(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AssignmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let assignment_id = path.into_inner();
    service.delete(assignment_id, user.id).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        assignment_id = %assignment_id,
        "assignment deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Assignment deleted",
    }))
}
