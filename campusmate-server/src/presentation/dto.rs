use crate::domain::assignment::{Assignment, AssignmentStatus};
use crate::domain::quiz::QuizHistoryRecord;
use crate::domain::user::User;
use crate::infrastructure::llm::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub major: String,
    pub group: String,
    pub gpa: f64,
    pub study_goal: String,
    pub weak_subjects: Vec<String>,
    pub study_hours_per_week: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            major: user.major,
            group: user.group,
            gpa: user.gpa,
            study_goal: user.study_goal,
            weak_subjects: user.weak_subjects,
            study_hours_per_week: user.study_hours_per_week,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub user: UserResponse,
}

// ======================= ASSIGNMENTS =======================

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub course: String,
    pub status: Option<AssignmentStatus>,
    pub score: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub course: String,
    pub status: AssignmentStatus,
    pub score: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            title: a.title,
            course: a.course,
            status: a.status,
            score: a.score,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub assignment: AssignmentResponse,
}

#[derive(Debug, Serialize)]
pub struct AssignmentList {
    pub assignments: Vec<AssignmentResponse>,
}

// ======================= QUIZ HISTORY =======================

#[derive(Debug, Deserialize)]
pub struct QuizResultRequest {
    pub topic: String,
    pub score: i32,
    pub total_questions: i32,
}

#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub message: &'static str,
    pub percentage: i32,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct HistoryList {
    pub history: Vec<QuizHistoryRecord>,
}

// ======================= AI =======================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "documentText")]
    pub document_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "documentText")]
    pub document_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub session_id: String,
    pub extracted_text: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
