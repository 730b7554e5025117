use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::quiz_repository::QuizHistoryRepository;
use crate::domain::error::DomainError;
use crate::domain::quiz::{NewQuizAttempt, QuizHistoryRecord};

#[derive(Clone)]
pub struct HistoryService {
    repo: Arc<dyn QuizHistoryRepository>,
}

impl HistoryService {
    pub fn new(repo: Arc<dyn QuizHistoryRepository>) -> Self {
        Self { repo }
    }

    /// Validates before touching storage; invalid attempts never reach the
    /// repository.
    #[instrument(skip(self))]
    pub async fn record(
        &self,
        user_id: Uuid,
        topic: String,
        score: i32,
        total_questions: i32,
    ) -> Result<QuizHistoryRecord, DomainError> {
        let attempt = NewQuizAttempt::new(user_id, topic, score, total_questions)
            .map_err(DomainError::Validation)?;
        self.repo.append(attempt).await
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<QuizHistoryRecord>, DomainError> {
        self.repo.list_by_user(user_id).await
    }
}
