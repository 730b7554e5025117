use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_MAJOR: &str = "Computer Science";
pub const DEFAULT_GROUP: &str = "CS-101";
pub const DEFAULT_GPA: f64 = 3.5;
pub const DEFAULT_STUDY_GOAL: &str = "general";
pub const DEFAULT_STUDY_HOURS: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub major: String,
    #[sqlx(rename = "group_name")]
    pub group: String,
    pub gpa: f64,
    pub study_goal: String,
    pub weak_subjects: Vec<String>,
    pub study_hours_per_week: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            major: DEFAULT_MAJOR.to_string(),
            group: DEFAULT_GROUP.to_string(),
            gpa: DEFAULT_GPA,
            study_goal: DEFAULT_STUDY_GOAL.to_string(),
            weak_subjects: Vec::new(),
            study_hours_per_week: DEFAULT_STUDY_HOURS,
            created_at: Utc::now(),
        }
    }

    /// Applies every supplied field and leaves the rest untouched.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(major) = update.major {
            self.major = major;
        }
        if let Some(group) = update.group {
            self.group = group;
        }
        if let Some(gpa) = update.gpa {
            self.gpa = gpa;
        }
        if let Some(goal) = update.study_goal {
            self.study_goal = goal;
        }
        if let Some(subjects) = update.weak_subjects {
            self.weak_subjects = subjects;
        }
        if let Some(hours) = update.study_hours_per_week {
            self.study_hours_per_week = hours;
        }
    }
}

/// Partial profile change; `None` means "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub major: Option<String>,
    pub group: Option<String>,
    pub gpa: Option<f64>,
    pub study_goal: Option<String>,
    pub weak_subjects: Option<Vec<String>>,
    pub study_hours_per_week: Option<i32>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name must not be empty".into());
            }
        }
        if let Some(gpa) = self.gpa {
            if !gpa.is_finite() || gpa < 0.0 {
                return Err("gpa must be a non-negative number".into());
            }
        }
        if let Some(hours) = self.study_hours_per_week {
            if hours < 0 {
                return Err("study_hours_per_week must be greater than or equal to 0".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_profile_defaults() {
        let user = User::new("Ada".into(), "ada@example.com".into(), "hash".into());
        assert_eq!(user.major, DEFAULT_MAJOR);
        assert_eq!(user.group, DEFAULT_GROUP);
        assert_eq!(user.gpa, DEFAULT_GPA);
        assert_eq!(user.study_hours_per_week, DEFAULT_STUDY_HOURS);
        assert!(user.weak_subjects.is_empty());
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut user = User::new("Ada".into(), "ada@example.com".into(), "hash".into());
        user.apply(ProfileUpdate {
            major: Some("Mathematics".into()),
            ..Default::default()
        });
        user.apply(ProfileUpdate {
            gpa: Some(3.9),
            ..Default::default()
        });

        assert_eq!(user.name, "Ada");
        assert_eq!(user.major, "Mathematics");
        assert_eq!(user.gpa, 3.9);
        assert_eq!(user.group, DEFAULT_GROUP);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let negative_hours = ProfileUpdate {
            study_hours_per_week: Some(-1),
            ..Default::default()
        };
        assert!(negative_hours.validate().is_err());

        let blank_name = ProfileUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());

        let nan_gpa = ProfileUpdate {
            gpa: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan_gpa.validate().is_err());
        assert!(ProfileUpdate::default().validate().is_ok());
    }
}
