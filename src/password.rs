//! Credential Hasher
//!
//! Argon2id password hashing with a fresh salt per call. Verification treats
//! any malformed stored hash as a mismatch instead of surfacing an error.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2, Params,
};

use crate::config::AuthConfig;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Invalid Argon2 parameters")]
    Params,

    #[error("Password hashing failed")]
    Hash,
}

/// One-way credential hasher with a tunable cost factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl PasswordHasher {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            memory_cost: config.argon2_memory_cost,
            time_cost: config.argon2_time_cost,
            parallelism: config.argon2_parallelism,
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, HashError> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| HashError::Params)?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }

    /// Hash a password. The embedded salt makes repeated calls produce a
    /// different string for the same input.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| HashError::Hash)?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash in constant time.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        // Low cost parameters keep the tests fast.
        PasswordHasher {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn hash_round_trips_and_never_equals_plaintext() {
        let hasher = test_hasher();
        let hash = hasher.hash("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(hasher.verify("secret1", &hash));
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn same_password_hashes_differently_each_call() {
        let hasher = test_hasher();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_a_mismatch_not_an_error() {
        let hasher = test_hasher();
        assert!(!hasher.verify("secret1", "not-a-phc-string"));
        assert!(!hasher.verify("secret1", ""));
    }
}
