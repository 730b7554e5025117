pub mod assignment_repository;
pub mod quiz_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory;
