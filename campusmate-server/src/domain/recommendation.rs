//! Study-plan recommendations derived from a user's quiz history.
//!
//! Everything here is a pure function of the chronological list of quiz
//! percentages plus two profile fields, so the whole decision table is
//! testable without a database.

use std::collections::BTreeMap;

use serde::Serialize;

pub const WEAK_THRESHOLD: f64 = 70.0;
pub const STRONG_THRESHOLD: f64 = 85.0;

const EXTRA_HOURS_FOR_WEAK: i32 = 2;
const MANY_WEAK_TOPICS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStanding {
    Weak,
    Neutral,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyGoal {
    Exam,
    Revision,
    Other,
}

impl StudyGoal {
    pub fn parse(goal: &str) -> Self {
        match goal {
            "exam" => StudyGoal::Exam,
            "revision" => StudyGoal::Revision,
            _ => StudyGoal::Other,
        }
    }
}

/// One quiz result in chronological order.
#[derive(Debug, Clone, Copy)]
pub struct ScorePoint<'a> {
    pub topic: &'a str,
    pub percentage: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicStats {
    pub topic: String,
    pub average: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub study_goal: String,
    pub weak_topics: Vec<String>,
    pub strong_topics: Vec<String>,
    pub average_scores: BTreeMap<String, f64>,
    pub trend_analysis: BTreeMap<String, Trend>,
    pub recommended_action: String,
    pub study_plan: String,
    pub recommended_study_hours_per_week: i32,
}

/// Endpoint comparison only: the first and last score decide the trend.
pub fn trend(scores: &[i32]) -> Trend {
    match (scores.first(), scores.last()) {
        (Some(first), Some(last)) if scores.len() >= 2 => {
            if last > first {
                Trend::Improving
            } else if last < first {
                Trend::Declining
            } else {
                Trend::Stable
            }
        }
        _ => Trend::Stable,
    }
}

/// Arithmetic mean rounded to two decimals, ties to even.
pub fn average(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    let mean = sum as f64 / scores.len() as f64;
    (mean * 100.0).round_ties_even() / 100.0
}

pub fn classify(average: f64) -> TopicStanding {
    if average < WEAK_THRESHOLD {
        TopicStanding::Weak
    } else if average >= STRONG_THRESHOLD {
        TopicStanding::Strong
    } else {
        TopicStanding::Neutral
    }
}

/// Groups percentages by topic, keeping first-appearance order of topics and
/// chronological order inside each topic.
pub fn topic_stats(history: &[ScorePoint<'_>]) -> Vec<TopicStats> {
    let mut groups: Vec<(&str, Vec<i32>)> = Vec::new();
    for point in history {
        match groups.iter_mut().find(|(topic, _)| *topic == point.topic) {
            Some((_, scores)) => scores.push(point.percentage),
            None => groups.push((point.topic, vec![point.percentage])),
        }
    }

    groups
        .into_iter()
        .map(|(topic, scores)| TopicStats {
            topic: topic.to_string(),
            average: average(&scores),
            trend: trend(&scores),
        })
        .collect()
}

pub fn recommended_hours(base_hours: i32, weak_count: usize) -> i32 {
    let mut hours = base_hours;
    if weak_count > 0 {
        hours += EXTRA_HOURS_FOR_WEAK;
    }
    if weak_count >= MANY_WEAK_TOPICS {
        hours += EXTRA_HOURS_FOR_WEAK;
    }
    hours
}

pub fn study_plan_text(goal: &StudyGoal, weak_topics: &[String], declining_weak: &[String]) -> String {
    if weak_topics.is_empty() {
        return match goal {
            StudyGoal::Exam => {
                "You are performing well. Continue full exam simulations and timed quizzes."
                    .to_string()
            }
            _ => "Maintain your current learning pace and explore advanced topics.".to_string(),
        };
    }

    let weak = weak_topics.join(", ");
    match goal {
        StudyGoal::Exam if !declining_weak.is_empty() => format!(
            "Urgent focus on declining subjects: {}. Do daily quizzes and revision sessions.",
            declining_weak.join(", ")
        ),
        StudyGoal::Exam => format!(
            "Focus on intensive exam preparation for: {}. Practice quizzes daily and review mistakes.",
            weak
        ),
        StudyGoal::Revision => format!(
            "Revise weak subjects: {} with notes, summaries, and explanation-based learning.",
            weak
        ),
        StudyGoal::Other => format!(
            "Study weak topics step by step: {} using quizzes and concept explanations.",
            weak
        ),
    }
}

/// The fixed answer for users without any quiz history.
pub fn diagnostic_plan(study_goal: &str, base_hours: i32) -> StudyPlan {
    StudyPlan {
        message: Some("No quiz history yet".to_string()),
        study_goal: study_goal.to_string(),
        weak_topics: Vec::new(),
        strong_topics: Vec::new(),
        average_scores: BTreeMap::new(),
        trend_analysis: BTreeMap::new(),
        recommended_action: "Start with a diagnostic quiz to detect weak areas".to_string(),
        study_plan: "Take 1-2 quizzes to build your personalized learning profile".to_string(),
        recommended_study_hours_per_week: base_hours,
    }
}

pub fn recommend(history: &[ScorePoint<'_>], study_goal: &str, base_hours: i32) -> StudyPlan {
    if history.is_empty() {
        return diagnostic_plan(study_goal, base_hours);
    }

    let stats = topic_stats(history);

    let mut weak_topics = Vec::new();
    let mut strong_topics = Vec::new();
    let mut declining_weak = Vec::new();
    for stat in &stats {
        match classify(stat.average) {
            TopicStanding::Weak => {
                weak_topics.push(stat.topic.clone());
                if stat.trend == Trend::Declining {
                    declining_weak.push(stat.topic.clone());
                }
            }
            TopicStanding::Strong => strong_topics.push(stat.topic.clone()),
            TopicStanding::Neutral => {}
        }
    }

    let goal = StudyGoal::parse(study_goal);
    let recommended_action = if weak_topics.is_empty() {
        "Excellent performance. Move to advanced topics.".to_string()
    } else {
        format!("Prioritize weak subjects: {}", weak_topics.join(", "))
    };

    StudyPlan {
        message: None,
        study_goal: study_goal.to_string(),
        study_plan: study_plan_text(&goal, &weak_topics, &declining_weak),
        recommended_study_hours_per_week: recommended_hours(base_hours, weak_topics.len()),
        average_scores: stats.iter().map(|s| (s.topic.clone(), s.average)).collect(),
        trend_analysis: stats.iter().map(|s| (s.topic.clone(), s.trend)).collect(),
        recommended_action,
        weak_topics,
        strong_topics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points<'a>(items: &[(&'a str, i32)]) -> Vec<ScorePoint<'a>> {
        items
            .iter()
            .map(|(topic, percentage)| ScorePoint {
                topic: *topic,
                percentage: *percentage,
            })
            .collect()
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trend_uses_only_endpoints() {
        assert_eq!(trend(&[]), Trend::Stable);
        assert_eq!(trend(&[50]), Trend::Stable);
        assert_eq!(trend(&[50, 50]), Trend::Stable);
        assert_eq!(trend(&[40, 70]), Trend::Improving);
        assert_eq!(trend(&[70, 40]), Trend::Declining);
        // middle values are ignored
        assert_eq!(trend(&[40, 10, 10, 41]), Trend::Improving);
        assert_eq!(trend(&[60, 100, 100, 60]), Trend::Stable);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(average(&[70, 80]), 75.0);
        assert_eq!(average(&[100, 66, 66]), 77.33);
        assert_eq!(average(&[66, 67, 67]), 66.67);
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn average_ties_round_to_even() {
        assert_eq!(average(&[77, 77, 77, 77, 77, 77, 77, 78]), 77.12);
        assert_eq!(average(&[77, 77, 77, 77, 77, 78, 78, 78]), 77.38);
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify(69.99), TopicStanding::Weak);
        assert_eq!(classify(70.0), TopicStanding::Neutral);
        assert_eq!(classify(84.99), TopicStanding::Neutral);
        assert_eq!(classify(85.0), TopicStanding::Strong);
        assert_eq!(classify(0.0), TopicStanding::Weak);
        assert_eq!(classify(100.0), TopicStanding::Strong);
    }

    #[test]
    fn recommended_hours_steps() {
        assert_eq!(recommended_hours(5, 0), 5);
        assert_eq!(recommended_hours(5, 1), 7);
        assert_eq!(recommended_hours(5, 2), 7);
        assert_eq!(recommended_hours(5, 3), 9);
        assert_eq!(recommended_hours(5, 8), 9);
    }

    #[test]
    fn topics_keep_first_appearance_order() {
        let history = points(&[("Physics", 50), ("Algebra", 90), ("Physics", 80)]);
        let stats = topic_stats(&history);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].topic, "Physics");
        assert_eq!(stats[0].average, 65.0);
        assert_eq!(stats[0].trend, Trend::Improving);
        assert_eq!(stats[1].topic, "Algebra");
        assert_eq!(stats[1].trend, Trend::Stable);
    }

    #[test]
    fn plan_table_exam_without_weak_topics() {
        let text = study_plan_text(&StudyGoal::Exam, &[], &[]);
        assert_eq!(
            text,
            "You are performing well. Continue full exam simulations and timed quizzes."
        );
    }

    #[test]
    fn plan_table_exam_with_declining_weak_topics() {
        let text = study_plan_text(
            &StudyGoal::Exam,
            &names(&["Physics", "Chemistry"]),
            &names(&["Chemistry"]),
        );
        assert_eq!(
            text,
            "Urgent focus on declining subjects: Chemistry. Do daily quizzes and revision sessions."
        );
    }

    #[test]
    fn plan_table_exam_with_weak_topics() {
        let text = study_plan_text(&StudyGoal::Exam, &names(&["Physics", "Chemistry"]), &[]);
        assert_eq!(
            text,
            "Focus on intensive exam preparation for: Physics, Chemistry. Practice quizzes daily and review mistakes."
        );
    }

    #[test]
    fn plan_table_revision_with_weak_topics() {
        let declining = names(&["Physics"]);
        let text = study_plan_text(&StudyGoal::Revision, &names(&["Physics"]), &declining);
        assert_eq!(
            text,
            "Revise weak subjects: Physics with notes, summaries, and explanation-based learning."
        );
    }

    #[test]
    fn plan_table_other_goals() {
        assert_eq!(
            study_plan_text(&StudyGoal::Other, &names(&["Physics"]), &[]),
            "Study weak topics step by step: Physics using quizzes and concept explanations."
        );
        for goal in [StudyGoal::Revision, StudyGoal::Other] {
            assert_eq!(
                study_plan_text(&goal, &[], &[]),
                "Maintain your current learning pace and explore advanced topics."
            );
        }
    }

    #[test]
    fn goal_parsing_is_exact() {
        assert_eq!(StudyGoal::parse("exam"), StudyGoal::Exam);
        assert_eq!(StudyGoal::parse("revision"), StudyGoal::Revision);
        assert_eq!(StudyGoal::parse("Exam"), StudyGoal::Other);
        assert_eq!(StudyGoal::parse(""), StudyGoal::Other);
    }

    #[test]
    fn empty_history_gives_diagnostic_plan_for_any_profile() {
        for goal in ["exam", "revision", "general"] {
            let plan = recommend(&[], goal, 12);
            assert_eq!(plan.message.as_deref(), Some("No quiz history yet"));
            assert_eq!(
                plan.recommended_action,
                "Start with a diagnostic quiz to detect weak areas"
            );
            assert!(plan.weak_topics.is_empty());
            assert!(plan.strong_topics.is_empty());
            assert_eq!(plan.recommended_study_hours_per_week, 12);
            assert_eq!(plan.study_goal, goal);
        }
    }

    #[test]
    fn full_recommendation_for_exam_student() {
        let history = points(&[
            ("Physics", 80),
            ("Algebra", 90),
            ("Chemistry", 60),
            ("Physics", 40),
            ("Algebra", 88),
            ("Chemistry", 65),
            ("Biology", 50),
        ]);
        let plan = recommend(&history, "exam", 5);

        assert_eq!(plan.weak_topics, names(&["Physics", "Chemistry", "Biology"]));
        assert_eq!(plan.strong_topics, names(&["Algebra"]));
        assert_eq!(plan.average_scores["Physics"], 60.0);
        assert_eq!(plan.average_scores["Algebra"], 89.0);
        assert_eq!(plan.average_scores["Chemistry"], 62.5);
        assert_eq!(plan.trend_analysis["Physics"], Trend::Declining);
        assert_eq!(plan.trend_analysis["Chemistry"], Trend::Improving);
        assert_eq!(plan.trend_analysis["Biology"], Trend::Stable);
        assert_eq!(plan.recommended_study_hours_per_week, 9);
        assert_eq!(
            plan.study_plan,
            "Urgent focus on declining subjects: Physics. Do daily quizzes and revision sessions."
        );
        assert_eq!(
            plan.recommended_action,
            "Prioritize weak subjects: Physics, Chemistry, Biology"
        );
        assert!(plan.message.is_none());
    }

    #[test]
    fn strong_student_gets_advanced_action() {
        let history = points(&[("Algebra", 90), ("Algebra", 95), ("Physics", 75)]);
        let plan = recommend(&history, "revision", 5);

        assert!(plan.weak_topics.is_empty());
        assert_eq!(plan.strong_topics, names(&["Algebra"]));
        assert_eq!(plan.recommended_study_hours_per_week, 5);
        assert_eq!(
            plan.recommended_action,
            "Excellent performance. Move to advanced topics."
        );
        assert_eq!(
            plan.study_plan,
            "Maintain your current learning pace and explore advanced topics."
        );
    }

    #[test]
    fn single_weak_topic_adds_two_hours() {
        let plan = recommend(&points(&[("Physics", 55)]), "general", 5);
        assert_eq!(plan.weak_topics, names(&["Physics"]));
        assert_eq!(plan.recommended_study_hours_per_week, 7);
    }

    #[test]
    fn serialized_plan_uses_lowercase_trends_and_omits_message() {
        let plan = recommend(&points(&[("Physics", 40), ("Physics", 70)]), "exam", 5);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["trend_analysis"]["Physics"], "improving");
        assert!(json.get("message").is_none());
        assert_eq!(json["recommended_study_hours_per_week"], 7);
    }
}
