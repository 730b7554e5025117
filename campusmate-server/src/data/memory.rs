//! In-memory repository implementations backing the HTTP and service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::assignment_repository::AssignmentRepository;
use crate::data::quiz_repository::QuizHistoryRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::assignment::{Assignment, AssignmentUpdate};
use crate::domain::error::DomainError;
use crate::domain::quiz::{NewQuizAttempt, QuizHistoryRecord};
use crate::domain::user::{ProfileUpdate, User};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply(update);
            user.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    assignments: Mutex<Vec<Assignment>>,
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        self.assignments.lock().unwrap().push(assignment.clone());
        Ok(assignment)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        let assignments = self.assignments.lock().unwrap();
        // insertion order reversed is newest first even when timestamps tie
        Ok(assignments
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> Result<Option<Assignment>, DomainError> {
        let assignments = self.assignments.lock().unwrap();
        Ok(assignments
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>, DomainError> {
        let mut assignments = self.assignments.lock().unwrap();
        Ok(assignments
            .iter_mut()
            .find(|a| a.id == id && a.user_id == user_id)
            .map(|a| {
                a.apply(update);
                a.clone()
            }))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let mut assignments = self.assignments.lock().unwrap();
        let before = assignments.len();
        assignments.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok(assignments.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryQuizHistoryRepository {
    records: Mutex<Vec<QuizHistoryRecord>>,
}

impl InMemoryQuizHistoryRepository {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl QuizHistoryRepository for InMemoryQuizHistoryRepository {
    async fn append(&self, attempt: NewQuizAttempt) -> Result<QuizHistoryRecord, DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = QuizHistoryRecord {
            id: records.len() as i64 + 1,
            user_id: attempt.user_id,
            topic: attempt.topic,
            score: attempt.score,
            total_questions: attempt.total_questions,
            percentage: attempt.percentage,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<QuizHistoryRecord>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
