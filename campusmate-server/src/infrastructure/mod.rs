pub mod config;
pub mod database;
pub mod llm;
pub mod logging;
pub mod security;
