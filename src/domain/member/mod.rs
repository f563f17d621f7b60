//! Member aggregate
//!
//! Contains the Member root, its owned detail record, value types, DTOs,
//! and the repository interface.

pub mod detail;
pub mod email;
pub mod model;
pub mod profile;
pub mod repository;
pub mod snapshot;

mod dto_register;
mod dto_update;

pub use detail::{DetailStatus, MemberDetail};
pub use email::Email;
pub use model::{Member, MemberStatus};
pub use profile::{Profile, PROFILE_MAX_LEN};
pub use snapshot::{MemberDetailSnapshot, MemberSnapshot};

// Re-export DTOs
pub use dto_register::RegisterMemberDto;
pub use dto_update::UpdateMemberInfoDto;

// Re-export repository trait
pub use repository::MemberRepository;
