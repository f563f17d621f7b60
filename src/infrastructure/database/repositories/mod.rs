//! Database repository implementations
//!
//! SeaORM-backed adapters for the domain repository ports.

pub mod member_repository;

pub use member_repository::SeaOrmMemberRepository;
