//! # Member Service
//!
//! Member registration and lifecycle management.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Member aggregate, value types, DTOs and port traits
//! - **application**: Use cases (registration, lifecycle, lookups)
//! - **infrastructure**: SeaORM and in-memory repositories, bcrypt, notifiers
//! - **shared**: Error taxonomy shared by all layers
//! - **runtime**: Bootstrap and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export use cases for easy access
pub use application::{MemberFinder, MemberService};

// Re-export database types
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmMemberRepository};

pub use shared::{DomainError, DomainResult, ErrorKind};
