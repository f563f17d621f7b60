pub mod membership;

// Re-export key types for convenience
pub use membership::{MemberFinder, MemberService};
