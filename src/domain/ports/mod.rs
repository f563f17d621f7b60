//! Domain ports (hexagonal architecture boundaries)
//!
//! Ports define the interfaces between the domain core and the outside world.
//! These are trait contracts that external adapters implement or call.

pub mod inbound;
pub mod outbound;

pub use inbound::{MemberCommands, MemberQueries};
pub use outbound::{NotificationError, Notifier, PasswordHasher};
