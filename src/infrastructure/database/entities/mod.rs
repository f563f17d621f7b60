//! Database entities module

pub mod member;
pub mod member_detail;

pub use member::Entity as Member;
pub use member_detail::Entity as MemberDetail;
