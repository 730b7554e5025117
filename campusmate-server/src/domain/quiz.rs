use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizHistoryRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub topic: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub created_at: DateTime<Utc>,
}

/// A quiz attempt that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizAttempt {
    pub user_id: Uuid,
    pub topic: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
}

impl NewQuizAttempt {
    pub fn new(user_id: Uuid, topic: String, score: i32, total_questions: i32) -> Result<Self, String> {
        if total_questions <= 0 {
            return Err("total_questions must be greater than 0".into());
        }
        if score < 0 {
            return Err("score must be greater than or equal to 0".into());
        }
        if score > total_questions {
            return Err("score must not exceed total_questions".into());
        }
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return Err("topic must not be empty".into());
        }
        Ok(Self {
            user_id,
            topic,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
        })
    }
}

/// `floor(score / total * 100)` in exact integer arithmetic.
///
/// Computed once when the attempt is stored; historical rows keep the value
/// they were written with.
pub fn percentage(score: i32, total_questions: i32) -> i32 {
    let scaled = i64::from(score) * 100;
    scaled.div_euclid(i64::from(total_questions)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_floored() {
        assert_eq!(percentage(7, 10), 70);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(29, 100), 29);
        assert_eq!(percentage(10, 10), 100);
        assert_eq!(percentage(0, 7), 0);
    }

    #[test]
    fn percentage_matches_floor_for_small_inputs() {
        for total in 1..=25 {
            for score in 0..=total {
                let expected = (score * 100) / total;
                assert_eq!(percentage(score, total), expected, "{}/{}", score, total);
            }
        }
    }

    #[test]
    fn attempt_rejects_non_positive_totals() {
        let user = Uuid::new_v4();
        assert!(NewQuizAttempt::new(user, "Algebra".into(), 3, 0).is_err());
        assert!(NewQuizAttempt::new(user, "Algebra".into(), 3, -5).is_err());
        assert!(NewQuizAttempt::new(user, "Algebra".into(), -1, 5).is_err());
        assert!(NewQuizAttempt::new(user, "   ".into(), 1, 5).is_err());
    }

    #[test]
    fn attempt_rejects_score_above_total() {
        let user = Uuid::new_v4();
        assert!(NewQuizAttempt::new(user, "Algebra".into(), 11, 10).is_err());
        assert!(NewQuizAttempt::new(user, "Algebra".into(), 30_000_000, 1).is_err());
        assert!(NewQuizAttempt::new(user, "Algebra".into(), i32::MAX, 1).is_err());

        let full = NewQuizAttempt::new(user, "Algebra".into(), i32::MAX, i32::MAX).unwrap();
        assert_eq!(full.percentage, 100);
    }

    #[test]
    fn attempt_trims_topic_and_stores_percentage() {
        let attempt = NewQuizAttempt::new(Uuid::new_v4(), " Algebra ".into(), 4, 6).unwrap();
        assert_eq!(attempt.topic, "Algebra");
        assert_eq!(attempt.percentage, 66);
    }
}
