use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::quiz_repository::QuizHistoryRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::recommendation::{ScorePoint, StudyPlan, recommend};

#[derive(Clone)]
pub struct RecommendationService {
    users: Arc<dyn UserRepository>,
    history: Arc<dyn QuizHistoryRepository>,
}

impl RecommendationService {
    pub fn new(users: Arc<dyn UserRepository>, history: Arc<dyn QuizHistoryRepository>) -> Self {
        Self { users, history }
    }

    #[instrument(skip(self))]
    pub async fn study_plan(&self, user_id: Uuid) -> Result<StudyPlan, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        let records = self.history.list_by_user(user_id).await?;

        let points: Vec<ScorePoint<'_>> = records
            .iter()
            .map(|r| ScorePoint {
                topic: &r.topic,
                percentage: r.percentage,
            })
            .collect();

        Ok(recommend(
            &points,
            &user.study_goal,
            user.study_hours_per_week,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{InMemoryQuizHistoryRepository, InMemoryUserRepository};
    use crate::domain::quiz::NewQuizAttempt;
    use crate::domain::user::{ProfileUpdate, User};

    #[tokio::test]
    async fn plan_is_built_from_stored_history_and_profile() {
        let users = Arc::new(InMemoryUserRepository::default());
        let history = Arc::new(InMemoryQuizHistoryRepository::default());
        let svc = RecommendationService::new(users.clone(), history.clone());

        let user = users
            .create(User::new("Ada".into(), "ada@example.com".into(), "hash".into()))
            .await
            .unwrap();
        users
            .update_profile(
                user.id,
                ProfileUpdate {
                    study_goal: Some("exam".into()),
                    study_hours_per_week: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let empty = svc.study_plan(user.id).await.unwrap();
        assert_eq!(empty.message.as_deref(), Some("No quiz history yet"));

        for (topic, score) in [("Physics", 7), ("Physics", 4)] {
            history
                .append(NewQuizAttempt::new(user.id, topic.into(), score, 10).unwrap())
                .await
                .unwrap();
        }

        let plan = svc.study_plan(user.id).await.unwrap();
        assert_eq!(plan.weak_topics, vec!["Physics".to_string()]);
        assert_eq!(plan.recommended_study_hours_per_week, 7);
        assert!(plan.study_plan.starts_with("Urgent focus on declining subjects: Physics"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = RecommendationService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryQuizHistoryRepository::default()),
        );
        assert!(matches!(
            svc.study_plan(Uuid::new_v4()).await,
            Err(DomainError::UserNotFound(_))
        ));
    }
}
