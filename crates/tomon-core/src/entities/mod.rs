//! Domain entities - objects exchanged with the Tomon platform

mod channel;
mod credential;
mod guild;
mod member;
mod message;
mod user;

pub use channel::{Channel, ChannelType, Overwrite};
pub use credential::Credential;
pub use guild::{Guild, GuildSnapshot};
pub use member::Member;
pub use message::{Attachment, Message, Reaction, ReactionEmoji, Stamp};
pub use user::{SelfUser, User};
