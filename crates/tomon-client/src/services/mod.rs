//! Entity services
//!
//! Each service borrows the shared [`ServiceContext`] and covers one
//! resource. Reads prefer the cache; REST results are never written back.

pub mod channel;
pub mod context;
pub mod member;
pub mod message;
pub mod moderation;
pub mod user;

pub use channel::ChannelService;
pub use context::ServiceContext;
pub use member::MemberService;
pub use message::MessageService;
pub use moderation::ModerationService;
pub use user::UserService;
