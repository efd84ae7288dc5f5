//! Password hashing with Argon2id
//!
//! Digests are PHC strings, so the salt and cost parameters travel inside
//! the digest and verification needs no side channel.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AppError;

/// Argon2id parameters per current OWASP guidance: 64 MiB memory,
/// 3 iterations, 1 lane.
fn argon2_instance() -> Argon2<'static> {
    let params = Params::new(
        64 * 1024, // m_cost in KiB
        3,         // t_cost
        1,         // p_cost
        None,      // default output length (32 bytes)
    )
    .expect("static Argon2 params are valid");

    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// Empty passwords are rejected before any hashing happens. A hashing
/// failure means the process could not source entropy and is surfaced as an
/// internal error.
pub fn hash(plaintext: &str) -> Result<String, AppError> {
    if plaintext.is_empty() {
        return Err(AppError::ValidationError("password must not be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    argon2_instance()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
}

/// Verifies a password against a stored PHC digest in constant time.
///
/// Never errors: a digest that cannot be parsed, or any verifier failure,
/// reads as a non-match.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    argon2_instance()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
