//! Password hashing with bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::{DomainError, DomainResult, PasswordHasher};

/// Lowest and highest cost bcrypt accepts.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt-backed [`PasswordHasher`].
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        hash(plaintext, self.cost)
            .map_err(|e| DomainError::Infrastructure(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, plaintext: &str, credential: &str) -> DomainResult<bool> {
        verify(plaintext, credential)
            .map_err(|e| DomainError::Infrastructure(format!("Failed to verify password: {}", e)))
    }
}
