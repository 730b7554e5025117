use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const NO_SCORE: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AssignmentStatus::Pending),
            "Completed" => Ok(AssignmentStatus::Completed),
            other => Err(format!("unknown assignment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub course: String,
    pub status: AssignmentStatus,
    pub score: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(
        user_id: Uuid,
        title: String,
        course: String,
        status: Option<AssignmentStatus>,
        score: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            course,
            status: status.unwrap_or_default(),
            score: normalize_score(score),
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: AssignmentUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(course) = update.course {
            self.course = course;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(score) = update.score {
            self.score = normalize_score(Some(score));
        }
    }
}

/// Blank or missing scores are stored as the `-` sentinel.
pub fn normalize_score(score: Option<String>) -> String {
    match score {
        Some(s) if !s.trim().is_empty() => s,
        _ => NO_SCORE.to_string(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub course: Option<String>,
    pub status: Option<AssignmentStatus>,
    pub score: Option<String>,
}

impl AssignmentUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err("title must not be empty".into());
        }
        if matches!(&self.course, Some(c) if c.trim().is_empty()) {
            return Err("course must not be empty".into());
        }
        Ok(())
    }
}
