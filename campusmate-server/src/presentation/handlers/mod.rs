pub mod ai;
pub mod assignments;
pub mod auth;
pub mod health;
pub mod history;
pub mod quizzes;
pub mod recommendations;
