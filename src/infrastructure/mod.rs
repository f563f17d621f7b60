//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod notification;
pub mod storage;

pub use crypto::BcryptPasswordHasher;
pub use database::{init_database, DatabaseConfig, SeaOrmMemberRepository};
pub use notification::{DisabledNotifier, LogNotifier};
pub use storage::InMemoryMemberRepository;
