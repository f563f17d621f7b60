pub mod member;
pub mod ports;

// Re-export commonly used types
pub use member::{
    DetailStatus, Email, Member, MemberDetail, MemberDetailSnapshot, MemberRepository,
    MemberSnapshot, MemberStatus, Profile, RegisterMemberDto, UpdateMemberInfoDto,
};
pub use ports::{MemberCommands, MemberQueries, NotificationError, Notifier, PasswordHasher};

pub use crate::shared::errors::{DomainError, DomainResult, ErrorKind};
