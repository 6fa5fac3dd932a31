//! REST endpoints grouped by resource

mod auth;
mod channels;
mod members;
mod messages;

pub use auth::LoginResponse;
pub use messages::AttachmentFile;
