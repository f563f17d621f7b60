//! Membership module — member registration & lifecycle
//!
//! `MemberService` orchestrates the write-side use cases,
//! `MemberFinder` serves read-only lookups.

pub mod queries;
pub mod service;

pub use queries::MemberFinder;
pub use service::{MemberService, DEFAULT_WELCOME_SUBJECT};
