pub mod ai_service;
pub mod assignment_service;
pub mod auth_service;
pub mod document_service;
pub mod history_service;
pub mod recommendation_service;
