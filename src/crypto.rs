// ABOUTME: Password hashing and verification using Argon2 with random salts
// ABOUTME: Produces PHC-formatted digests that are stored on user records

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{rngs::OsRng, RngCore};

use crate::error::Result;

const SALT_SIZE: usize = 16; // 128 bits salt for Argon2
const GENERATED_PASSWORD_SIZE: usize = 32;

pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);

    let salt_string = SaltString::encode_b64(&salt)?;
    let digest = Argon2::default().hash_password(password.as_bytes(), &salt_string)?;

    Ok(digest.to_string())
}

/// Returns false for a malformed digest instead of failing.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!("Stored password digest is malformed: {}", err);
            false
        }
    }
}

/// Random password for non-interactive accounts nobody signs in with.
pub fn generate_password() -> String {
    let mut bytes = [0u8; GENERATED_PASSWORD_SIZE];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("secret_password").unwrap();

        assert!(digest.starts_with("$argon2"));
        assert!(verify_password("secret_password", &digest));
        assert!(!verify_password("wrong_password", &digest));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("admin").unwrap();
        let second = hash_password("admin").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("admin", &first));
        assert!(verify_password("admin", &second));
    }

    #[test]
    fn test_malformed_digest_does_not_verify() {
        assert!(!verify_password("admin", "not-a-phc-string"));
    }

    #[test]
    fn test_generated_passwords_differ() {
        let first = generate_password();
        assert_eq!(first.len(), GENERATED_PASSWORD_SIZE * 2);
        assert_ne!(first, generate_password());
    }
}
