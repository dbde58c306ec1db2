use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use serde::Deserialize;

use super::errors::PasswordError;

/// Argon2id cost factors.
///
/// `memory` is expressed in KiB, `salt_length` and `hash_length` in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Argon2Params {
    pub iterations: u32,
    pub memory: u32,
    pub parallelism: u32,
    pub salt_length: usize,
    pub hash_length: usize,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            iterations: Params::DEFAULT_T_COST,
            memory: Params::DEFAULT_M_COST,
            parallelism: Params::DEFAULT_P_COST,
            salt_length: 16,
            hash_length: Params::DEFAULT_OUTPUT_LEN,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    salt_length: usize,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            salt_length: Argon2Params::default().salt_length,
        }
    }

    /// Create a password hasher with explicit cost factors.
    ///
    /// # Arguments
    /// * `params` - Iterations, memory, parallelism, salt and output lengths
    ///
    /// # Errors
    /// * `HashingFailed` - The parameter combination is rejected by Argon2
    pub fn with_params(params: &Argon2Params) -> Result<Self, PasswordError> {
        let argon2_params = Params::new(
            params.memory,
            params.iterations,
            params.parallelism,
            Some(params.hash_length),
        )
        .map_err(|e| PasswordError::HashingFailed(format!("Invalid Argon2 parameters: {}", e)))?;

        // Fail at construction rather than on the first hash
        if params.salt_length < argon2::MIN_SALT_LEN {
            return Err(PasswordError::HashingFailed(format!(
                "Invalid salt length: {} bytes, at least {} required",
                params.salt_length,
                argon2::MIN_SALT_LEN
            )));
        }
        SaltString::encode_b64(&vec![0u8; params.salt_length])
            .map_err(|e| PasswordError::HashingFailed(format!("Invalid salt length: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
            salt_length: params.salt_length,
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Algorithm, cost factors, salt and output length are all read from the
    /// PHC string, so hashes produced with other parameters still verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
