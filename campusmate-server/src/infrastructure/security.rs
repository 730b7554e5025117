use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub exp: i64,
}

impl Claims {
    pub fn user_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.user_id).ok()
    }
}

/// Outcome of checking a token. Only `Valid` grants access; the other
/// variants exist so callers and tests can tell failures apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Malformed,
    SignatureInvalid,
}

impl TokenStatus {
    pub fn into_claims(self) -> Option<Claims> {
        match self {
            TokenStatus::Valid(claims) => Some(claims),
            _ => None,
        }
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(user_id, email, self.ttl)
    }

    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> TokenStatus {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) if data.claims.user_uuid().is_some() => TokenStatus::Valid(data.claims),
            Ok(_) => TokenStatus::Malformed,
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => TokenStatus::Expired,
                ErrorKind::InvalidSignature => TokenStatus::SignatureInvalid,
                _ => TokenStatus::Malformed,
            },
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_claims() {
        let keys = JwtKeys::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "ada@example.com").unwrap();

        match keys.verify(&token) {
            TokenStatus::Valid(claims) => {
                assert_eq!(claims.user_uuid(), Some(user_id));
                assert_eq!(claims.email, "ada@example.com");
                assert!(claims.exp > Utc::now().timestamp());
            }
            other => panic!("expected valid token, got {:?}", other),
        }
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let keys = JwtKeys::new("test-secret");
        let token = keys
            .issue_with_ttl(Uuid::new_v4(), "ada@example.com", Duration::hours(-2))
            .unwrap();
        assert_eq!(keys.verify(&token), TokenStatus::Expired);
    }

    #[test]
    fn token_from_other_secret_fails_signature_check() {
        let token = JwtKeys::new("secret-a")
            .issue(Uuid::new_v4(), "ada@example.com")
            .unwrap();
        assert_eq!(
            JwtKeys::new("secret-b").verify(&token),
            TokenStatus::SignatureInvalid
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let keys = JwtKeys::new("test-secret");
        assert_eq!(keys.verify("not-a-jwt"), TokenStatus::Malformed);
        assert_eq!(keys.verify(""), TokenStatus::Malformed);
    }

    #[test]
    fn non_uuid_subject_is_malformed() {
        let keys = JwtKeys::new("test-secret");
        let claims = Claims {
            user_id: "42".into(),
            email: "ada@example.com".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert_eq!(keys.verify(&token), TokenStatus::Malformed);
    }

    #[test]
    fn password_hash_is_salted_and_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert_ne!(hash, hash_password("hunter22").unwrap());
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }
}
