//! Credential hashing adapters

pub mod password;

pub use password::BcryptPasswordHasher;
