use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::assignment_repository::AssignmentRepository;
use crate::domain::assignment::{Assignment, AssignmentStatus, AssignmentUpdate};
use crate::domain::error::DomainError;

#[derive(Clone)]
pub struct AssignmentService {
    repo: Arc<dyn AssignmentRepository>,
}

impl AssignmentService {
    pub fn new(repo: Arc<dyn AssignmentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        self.repo.list_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: String,
        course: String,
        status: Option<AssignmentStatus>,
        score: Option<String>,
    ) -> Result<Assignment, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title is required"));
        }
        if course.trim().is_empty() {
            return Err(DomainError::validation("course is required"));
        }
        let assignment = Assignment::new(user_id, title, course, status, score);
        self.repo.create(assignment).await
    }

    pub async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Assignment, DomainError> {
        self.repo
            .find(id, user_id)
            .await?
            .ok_or(DomainError::AssignmentNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Assignment, DomainError> {
        update.validate().map_err(DomainError::Validation)?;
        self.repo
            .update(id, user_id, update)
            .await?
            .ok_or(DomainError::AssignmentNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(id, user_id).await? {
            Ok(())
        } else {
            Err(DomainError::AssignmentNotFound(id))
        }
    }
}
