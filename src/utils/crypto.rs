use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::utils::error::{Error, Result};

/// Hash a plaintext password into a PHC string. Called at the repository
/// boundary so no plaintext credential is ever persisted.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| Error::Infrastructure(format!("failed to hash password: {e}")))?
        .to_string();
    Ok(hash)
}

/// Verify a plaintext password against the stored Argon2 hash.
pub fn verify_password(stored_hash: &str, plain: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|_| Error::Infrastructure("invalid stored password hash".into()))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
