pub(crate) use crate::auth::dto::{Claims, JwtKeys, PublicUser};
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use std::time::Duration;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, info, warn};

use crate::store::Role;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, ttl_hours } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_hours as u64) * 3600),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, email: &str, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: email.to_owned(),
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(email = %email, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(email = %data.claims.sub, "session token verified");
        Ok(data.claims)
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    Success { token: String, user: PublicUser },
    InvalidCredentials,
}

/// Verifies credentials and issues a session token. Unknown email and wrong
/// password collapse into the same outcome so callers cannot enumerate
/// accounts.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, ApiError> {
    let Some(credential) = state.store.find_credential_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Ok(LoginOutcome::InvalidCredentials);
    };

    if !verify_password(password, &credential.password_hash)? {
        warn!(email = %email, "login invalid password");
        return Ok(LoginOutcome::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(&credential.email, credential.role)?;
    info!(email = %credential.email, "admin logged in");
    Ok(LoginOutcome::Success {
        token,
        user: PublicUser {
            email: credential.email,
            role: credential.role,
        },
    })
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn email_regex_accepts_addresses_and_rejects_junk() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("admin@lsweb.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}

#[cfg(test)]
mod jwt_tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn sign_and_verify_session_token() {
        let keys = make_keys();
        let token = keys.sign("admin@lsweb.com", Role::Admin).expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, "admin@lsweb.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn expiry_lands_twenty_four_hours_out() {
        let keys = make_keys();
        let token = keys.sign("admin@lsweb.com", Role::Admin).expect("sign");
        let claims = keys.verify(&token).expect("verify token");

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let remaining = claims.exp as i64 - now;
        assert!((24 * 3600 - 2..=24 * 3600 + 2).contains(&remaining));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[tokio::test]
    async fn verify_rejects_token_signed_with_other_secret() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"another-secret"),
            decoding: DecodingKey::from_secret(b"another-secret"),
            ttl: Duration::from_secs(3600),
        };
        let token = other.sign("admin@lsweb.com", Role::Admin).expect("sign");
        assert!(keys.verify(&token).is_err());
    }
}
