//! Password hashing.
//!
//! Argon2 work runs on the blocking pool so it never stalls async workers.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::auth::AuthServiceError;

/// Stands in for a stored hash when the username is unknown, so the lookup
/// costs the same Argon2 work either way. No password matches it.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$50g7KdIXJBTDa4g8gYreSg$tKaUCnP4bw+SgeO9qulPqQYSiTUTWYgROTfLSqqVg3M";

/// Hash a password into an Argon2id PHC string.
pub(crate) async fn hash_password(password: String) -> Result<String, AuthServiceError> {
    task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|error| AuthServiceError::PasswordHash(error.to_string()))?
}

/// Check a password against a stored PHC string.
///
/// With no stored hash the check still runs, against a dummy hash, and fails.
pub(crate) async fn verify_password(
    password: String,
    password_hash: Option<String>,
) -> Result<bool, AuthServiceError> {
    task::spawn_blocking(move || match password_hash {
        Some(hash) => verify_blocking(&password, &hash),
        None => {
            verify_blocking(&password, DUMMY_PASSWORD_HASH);
            false
        }
    })
    .await
    .map_err(|error| AuthServiceError::PasswordHash(error.to_string()))
}

fn hash_blocking(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| AuthServiceError::PasswordHash(error.to_string()))
}

// Unparseable stored hashes never verify.
fn verify_blocking(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
