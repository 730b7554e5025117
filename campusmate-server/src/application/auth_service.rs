use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::{
    error::DomainError,
    user::{ProfileUpdate, User},
};
use crate::infrastructure::security::{JwtKeys, TokenStatus, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, DomainError> {
        let name = name.trim().to_string();
        let email = email.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("a valid email is required"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(DomainError::UserAlreadyExists);
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = self.repo.create(User::new(name, email, hash)).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a token. Unknown email and wrong
    /// password produce the same error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self
            .repo
            .find_by_email(email.trim())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .keys
            .issue(user.id, &user.email)
            .map_err(|err| DomainError::Internal(err.to_string()))?;
        info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    /// Resolves a raw token to its user. Every failure collapses into
    /// `InvalidToken` without revealing which check failed.
    pub async fn authenticate_token(&self, token: &str) -> Result<User, DomainError> {
        let status = self.keys.verify(token);
        if !matches!(status, TokenStatus::Valid(_)) {
            tracing::debug!(?status, "token rejected");
        }
        let claims = status.into_claims().ok_or(DomainError::InvalidToken)?;
        let user_id = claims.user_uuid().ok_or(DomainError::InvalidToken)?;

        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::InvalidToken)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, DomainError> {
        update.validate().map_err(DomainError::Validation)?;
        self.repo
            .update_profile(id, update)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }
}
