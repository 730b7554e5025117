pub mod assignment;
pub mod error;
pub mod quiz;
pub mod recommendation;
pub mod user;
